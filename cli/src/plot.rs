use anyhow::{Result, anyhow};
use log::{debug, info};
use pit_engine::Engine;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

const SAMPLES: usize = 600;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub gross: f64,
    pub net: f64,
    pub tax: f64,
    pub insurance: f64,
}

pub fn sample_curve(
    engine: &Engine,
    max_gross: f64,
    dependents: u32,
    insurance: bool,
) -> Vec<CurvePoint> {
    (0..=SAMPLES)
        .map(|i| {
            let gross = max_gross * i as f64 / SAMPLES as f64;
            let result = engine.project(gross, dependents, insurance);
            CurvePoint {
                gross: gross / 1e6,
                net: result.net_monthly / 1e6,
                tax: result.total_tax / 1e6,
                insurance: result.employee_insurance / 1e6,
            }
        })
        .collect()
}

// SVG for a `.svg` path, PNG otherwise.
pub fn plot_net_curve(
    engine: &Engine,
    path: &Path,
    max_gross: f64,
    dependents: u32,
    insurance: bool,
) -> Result<()> {
    if !(max_gross.is_finite() && max_gross > 0.0) {
        return Err(anyhow!("Invalid maximum gross salary: {max_gross}"));
    }
    info!(
        "Creating plot {} (max_gross={max_gross}, dependents={dependents}, insurance={insurance})",
        path.display()
    );
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let points = sample_curve(engine, max_gross, dependents, insurance);
    debug!("Sampled {} points", points.len());

    if path.extension().is_some_and(|ext| ext == "svg") {
        let root = SVGBackend::new(path, (1000, 800)).into_drawing_area();
        draw_curve(&root, &points, dependents)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(path, (1000, 800)).into_drawing_area();
        draw_curve(&root, &points, dependents)?;
        root.present()?;
    }

    Ok(())
}

fn draw_curve<DB>(
    root: &DrawingArea<DB, Shift>,
    points: &[CurvePoint],
    dependents: u32,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let max = points.last().map_or(1.0, |p| p.gross.max(1.0));
    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Monthly salary, {dependents} dependent(s)"),
            ("sans-serif", 30),
        )
        .margin(40)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..max, 0.0..max)?;

    chart
        .configure_mesh()
        .label_style(("sans-serif", 20))
        .x_desc("Gross (million VND)")
        .y_desc("Million VND")
        .axis_desc_style(("sans-serif", 24))
        .draw()?;

    let series: [(&str, RGBColor, fn(&CurvePoint) -> f64); 3] = [
        ("Net", RGBColor(0x20, 0xa0, 0xa0), |p| p.net),
        ("Tax", RGBColor(0xc0, 0x40, 0x40), |p| p.tax),
        ("Insurance", RGBColor(0xe0, 0xa0, 0x00), |p| p.insurance),
    ];
    for (label, color, value) in series {
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p.gross, value(p))),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 20))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn curve_samples() {
        let points = sample_curve(&Engine::default(), 60_000_000.0, 0, true);
        assert_eq!(points.len(), SAMPLES + 1);
        assert_eq!(points[0].gross, 0.0);
        assert_eq!(points[SAMPLES].gross, 60.0);

        // 20 million is sample 200 out of 600.
        let point = points[200];
        assert!((point.gross - 20.0).abs() < 1e-9);
        assert!((point.net - 17.46).abs() < 1e-9);
        assert!((point.tax - 0.44).abs() < 1e-9);

        for pair in points.windows(2) {
            assert!(pair[1].net >= pair[0].net);
        }
    }

    #[test]
    fn reject_max_gross() {
        let engine = Engine::default();
        let path = std::env::temp_dir().join("pit-vietnam-rejected.png");
        for max_gross in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            assert!(plot_net_curve(&engine, &path, max_gross, 0, true).is_err());
        }
        assert!(!path.exists());
    }
}
