#![forbid(unsafe_code)]

//! Vietnam personal income tax: deductions, capped social insurance and
//! progressive brackets, from either a gross or a net salary.

mod engine;
mod inputs;
mod schedule;
mod tax;

pub use engine::{CalculationResult, Engine, SOLVER_ITERATIONS};
pub use inputs::{CalculationInputs, Period, SalaryMode, to_monthly};
pub use schedule::{Contributions, InsuranceRates, Schedule, TaxBracket};
pub use tax::TaxBreakdownLine;
