#![forbid(unsafe_code)]

mod plot;

use pit_engine::{CalculationInputs, CalculationResult, Engine, Schedule};
use plot::plot_net_curve;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{HtmlCanvasElement, console};

#[wasm_bindgen]
pub struct State {
    engine: Option<Engine>,
}

#[wasm_bindgen]
impl State {
    #[expect(clippy::new_without_default)]
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let engine = match Engine::new(Schedule::default()) {
            Ok(engine) => Some(engine),
            Err(e) => {
                console::error_1(&JsValue::from_str(&format!("Invalid schedule: {e:?}")));
                None
            }
        };
        Self { engine }
    }

    /// Computes the form's result. `mode` is "gross" or "net", `period` is
    /// "monthly" or "annual".
    pub fn calculate(
        &self,
        mode: &str,
        period: &str,
        income: f64,
        dependents: u32,
        insurance: bool,
    ) -> Result<Summary, JsValue> {
        let engine = self.engine()?;
        let inputs = parse_inputs(mode, period, income, dependents, insurance)?;
        Ok(Summary {
            result: engine.compute_result(&inputs),
        })
    }

    pub fn plot(
        &self,
        canvas: HtmlCanvasElement,
        dependents: u32,
        insurance: bool,
        max_gross: f64,
    ) -> Result<(), JsValue> {
        let engine = self.engine()?;
        if !(max_gross.is_finite() && max_gross > 0.0) {
            return Err(format!("Invalid maximum gross salary: {max_gross}").into());
        }
        plot_net_curve(canvas, engine, max_gross, dependents, insurance)
    }
}

impl State {
    fn engine(&self) -> Result<&Engine, JsValue> {
        self.engine
            .as_ref()
            .ok_or_else(|| "Failed to load schedule".into())
    }
}

fn parse_inputs(
    mode: &str,
    period: &str,
    income: f64,
    dependents: u32,
    insurance: bool,
) -> Result<CalculationInputs, String> {
    let inputs = CalculationInputs {
        mode: mode.parse()?,
        period: period.parse()?,
        income,
        dependents,
        insurance,
    };
    inputs.validate().map_err(|e| e.to_string())?;
    Ok(inputs)
}

/// Result of one calculation, with monthly amounts in VND.
#[wasm_bindgen]
pub struct Summary {
    result: CalculationResult,
}

#[wasm_bindgen]
impl Summary {
    #[wasm_bindgen(getter)]
    pub fn gross_monthly(&self) -> f64 {
        self.result.gross_monthly
    }

    #[wasm_bindgen(getter)]
    pub fn net_monthly(&self) -> f64 {
        self.result.net_monthly
    }

    #[wasm_bindgen(getter)]
    pub fn total_tax(&self) -> f64 {
        self.result.total_tax
    }

    #[wasm_bindgen(getter)]
    pub fn insurance_base(&self) -> f64 {
        self.result.insurance_base
    }

    #[wasm_bindgen(getter)]
    pub fn employee_insurance(&self) -> f64 {
        self.result.employee_insurance
    }

    #[wasm_bindgen(getter)]
    pub fn employer_insurance(&self) -> f64 {
        self.result.employer_insurance
    }

    #[wasm_bindgen(getter)]
    pub fn total_deductions(&self) -> f64 {
        self.result.total_deductions
    }

    #[wasm_bindgen(getter)]
    pub fn taxable_income(&self) -> f64 {
        self.result.taxable_income
    }

    #[wasm_bindgen(getter)]
    pub fn effective_tax_rate(&self) -> f64 {
        self.result.effective_tax_rate
    }

    #[wasm_bindgen(getter)]
    pub fn total_labor_cost(&self) -> f64 {
        self.result.total_labor_cost
    }

    pub fn bracket_rates(&self) -> Vec<f64> {
        self.result.breakdown.iter().map(|line| line.rate).collect()
    }

    pub fn bracket_taxable(&self) -> Vec<f64> {
        self.result.breakdown.iter().map(|line| line.taxable).collect()
    }

    pub fn bracket_tax(&self) -> Vec<f64> {
        self.result.breakdown.iter().map(|line| line.tax).collect()
    }
}
