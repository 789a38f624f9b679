use pit_engine::Engine;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

const SAMPLES: usize = 400;

pub fn plot_net_curve(
    canvas: HtmlCanvasElement,
    engine: &Engine,
    max_gross: f64,
    dependents: u32,
    insurance: bool,
) -> Result<(), JsValue> {
    let backend = CanvasBackend::with_canvas_object(canvas).ok_or("Failed to create backend")?;

    let root = backend.into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| format!("Failed to clear background: {e:?}"))?;

    // Amounts are plotted in millions of VND.
    let max = max_gross / 1e6;
    let mut chart = ChartBuilder::on(&root)
        .margin(50)
        .margin_left(80)
        .x_label_area_size(20)
        .y_label_area_size(20)
        .build_cartesian_2d(0.0..max, 0.0..max)
        .map_err(|e| format!("Failed to create chart: {e:?}"))?;

    chart
        .configure_mesh()
        .label_style(("sans-serif", 22))
        .x_labels(6)
        .y_labels(6)
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {e:?}"))?;

    let results: Vec<(f64, f64, f64, f64)> = (0..=SAMPLES)
        .map(|i| {
            let gross = max_gross * i as f64 / SAMPLES as f64;
            let result = engine.project(gross, dependents, insurance);
            (
                gross / 1e6,
                result.net_monthly / 1e6,
                result.total_tax / 1e6,
                result.employee_insurance / 1e6,
            )
        })
        .collect();

    chart
        .draw_series(LineSeries::new(
            results.iter().map(|&(x, net, _, _)| (x, net)),
            RGBColor(0x20, 0xa0, 0xa0).stroke_width(2),
        ))
        .map_err(|e| format!("Failed to draw net curve: {e:?}"))?;
    chart
        .draw_series(LineSeries::new(
            results.iter().map(|&(x, _, tax, _)| (x, tax)),
            RGBColor(0xc0, 0x40, 0x40).stroke_width(2),
        ))
        .map_err(|e| format!("Failed to draw tax curve: {e:?}"))?;
    chart
        .draw_series(LineSeries::new(
            results.iter().map(|&(x, _, _, insurance)| (x, insurance)),
            RGBColor(0xe0, 0xa0, 0x00).stroke_width(2),
        ))
        .map_err(|e| format!("Failed to draw insurance curve: {e:?}"))?;

    root.present()
        .map_err(|e| format!("Failed to present chart: {e:?}"))?;

    Ok(())
}
