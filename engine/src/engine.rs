use crate::inputs::{CalculationInputs, SalaryMode, to_monthly};
use crate::schedule::{Contributions, Schedule};
use crate::tax::{TaxBreakdownLine, calculate_tax};
use log::{debug, trace};
use serde::Serialize;

/// Number of correction steps of the net to gross solver.
pub const SOLVER_ITERATIONS: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    schedule: Schedule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub gross_monthly: f64,
    pub insurance_base: f64,
    pub employee_insurance: f64,
    pub employer_insurance: f64,
    pub employee_contributions: Contributions,
    pub employer_contributions: Contributions,
    pub total_deductions: f64,
    pub taxable_income: f64,
    pub breakdown: Vec<TaxBreakdownLine>,
    pub total_tax: f64,
    pub net_monthly: f64,
    pub effective_tax_rate: f64,
    pub total_labor_cost: f64,
}

struct Deductions {
    insurance_base: f64,
    employee_insurance: f64,
    total: f64,
    taxable_income: f64,
}

impl Engine {
    pub fn new(schedule: Schedule) -> anyhow::Result<Self> {
        schedule.validate()?;
        debug!("Using schedule with {} brackets", schedule.brackets.len());
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn clamp_insurance_base(&self, gross_monthly: f64, insurance_enabled: bool) -> f64 {
        if !insurance_enabled {
            0.0
        } else {
            gross_monthly.min(self.schedule.insurance_cap)
        }
    }

    pub fn calculate_tax(&self, taxable_income: f64) -> (Vec<TaxBreakdownLine>, f64) {
        calculate_tax(&self.schedule.brackets, taxable_income)
    }

    fn deductions(
        &self,
        gross_monthly: f64,
        dependents: u32,
        insurance_enabled: bool,
    ) -> Deductions {
        let insurance_base = self.clamp_insurance_base(gross_monthly, insurance_enabled);
        let employee_insurance = insurance_base * self.schedule.employee_rates.total();
        let total = self.schedule.personal_deduction
            + dependents as f64 * self.schedule.dependent_deduction
            + employee_insurance;
        Deductions {
            insurance_base,
            employee_insurance,
            total,
            taxable_income: (gross_monthly - total).max(0.0),
        }
    }

    pub fn net_from_gross(
        &self,
        gross_monthly: f64,
        dependents: u32,
        insurance_enabled: bool,
    ) -> f64 {
        let deductions = self.deductions(gross_monthly, dependents, insurance_enabled);
        let (_, tax) = self.calculate_tax(deductions.taxable_income);
        gross_monthly - deductions.employee_insurance - tax
    }

    /// Finds the monthly gross salary whose take-home pay is `target_net`.
    ///
    /// Net pay is piecewise linear in the gross salary with a slope well above
    /// one half, so correcting the guess by the residual converges quickly. The
    /// number of steps is fixed, there is no convergence test.
    pub fn solve_gross_from_net(
        &self,
        target_net: f64,
        dependents: u32,
        insurance_enabled: bool,
    ) -> f64 {
        let mut gross = target_net;
        for i in 0..SOLVER_ITERATIONS {
            let net = self.net_from_gross(gross, dependents, insurance_enabled);
            trace!("Solver step {i}: gross={gross}, net={net}");
            gross += target_net - net;
        }
        debug!("Solved gross {gross} for net {target_net}");
        gross.max(0.0)
    }

    pub fn project(
        &self,
        gross_monthly: f64,
        dependents: u32,
        insurance_enabled: bool,
    ) -> CalculationResult {
        let deductions = self.deductions(gross_monthly, dependents, insurance_enabled);
        let (breakdown, total_tax) = self.calculate_tax(deductions.taxable_income);

        let employer_insurance = deductions.insurance_base * self.schedule.employer_rates.total();
        let effective_tax_rate = if gross_monthly == 0.0 {
            0.0
        } else {
            total_tax / gross_monthly
        };

        CalculationResult {
            gross_monthly,
            insurance_base: deductions.insurance_base,
            employee_insurance: deductions.employee_insurance,
            employer_insurance,
            employee_contributions: self
                .schedule
                .employee_rates
                .apply(deductions.insurance_base),
            employer_contributions: self
                .schedule
                .employer_rates
                .apply(deductions.insurance_base),
            total_deductions: deductions.total,
            taxable_income: deductions.taxable_income,
            breakdown,
            total_tax,
            net_monthly: gross_monthly - deductions.employee_insurance - total_tax,
            effective_tax_rate,
            total_labor_cost: gross_monthly + employer_insurance,
        }
    }

    pub fn compute_result(&self, inputs: &CalculationInputs) -> CalculationResult {
        trace!("Computing {inputs:?}");
        let monthly = to_monthly(inputs.income, inputs.period);
        let gross_monthly = match inputs.mode {
            SalaryMode::Gross => monthly,
            SalaryMode::Net => {
                self.solve_gross_from_net(monthly, inputs.dependents, inputs.insurance)
            }
        };
        self.project(gross_monthly, inputs.dependents, inputs.insurance)
    }
}
