use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
    Annual,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" | "month" | "m" => Ok(Period::Monthly),
            "annual" | "year" | "y" => Ok(Period::Annual),
            _ => Err(format!("Unknown period: {s}")),
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Period::Monthly => f.write_str("monthly"),
            Period::Annual => f.write_str("annual"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryMode {
    Gross,
    Net,
}

impl FromStr for SalaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gross" => Ok(SalaryMode::Gross),
            "net" => Ok(SalaryMode::Net),
            _ => Err(format!("Unknown salary mode: {s}")),
        }
    }
}

impl Display for SalaryMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SalaryMode::Gross => f.write_str("gross"),
            SalaryMode::Net => f.write_str("net"),
        }
    }
}

pub fn to_monthly(amount: f64, period: Period) -> f64 {
    match period {
        Period::Monthly => amount,
        Period::Annual => amount / 12.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInputs {
    pub mode: SalaryMode,
    pub period: Period,
    pub income: f64,
    pub dependents: u32,
    pub insurance: bool,
}

impl CalculationInputs {
    /// The engine computes whatever it is given, so front-ends call this first.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.income.is_finite() {
            Err(anyhow!("Income must be a finite amount, got {}", self.income))
        } else if self.income < 0.0 {
            Err(anyhow!("Income must not be negative, got {}", self.income))
        } else {
            Ok(())
        }
    }
}
