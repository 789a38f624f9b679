use anyhow::anyhow;
use serde::{Deserialize, Serialize};

// Amounts are monthly, in VND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schedule {
    pub personal_deduction: f64,
    pub dependent_deduction: f64,
    pub insurance_cap: f64,
    pub employee_rates: InsuranceRates,
    pub employer_rates: InsuranceRates,
    /// Progressive brackets, consumed in order. The last one must be unbounded.
    pub brackets: Vec<TaxBracket>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            personal_deduction: 11_000_000.0,
            dependent_deduction: 4_400_000.0,
            insurance_cap: 36_000_000.0,
            employee_rates: InsuranceRates {
                social: 0.08,
                health: 0.015,
                unemployment: 0.01,
            },
            employer_rates: InsuranceRates {
                social: 0.175,
                health: 0.03,
                unemployment: 0.01,
            },
            brackets: vec![
                TaxBracket::new(5_000_000.0, 0.05),
                TaxBracket::new(5_000_000.0, 0.10),
                TaxBracket::new(8_000_000.0, 0.15),
                TaxBracket::new(14_000_000.0, 0.20),
                TaxBracket::new(20_000_000.0, 0.25),
                TaxBracket::new(28_000_000.0, 0.30),
                TaxBracket::new(f64::INFINITY, 0.35),
            ],
        }
    }
}

impl Schedule {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, amount) in [
            ("personal deduction", self.personal_deduction),
            ("dependent deduction", self.dependent_deduction),
            ("insurance cap", self.insurance_cap),
        ] {
            if !(amount.is_finite() && amount >= 0.0) {
                return Err(anyhow!("Invalid {name}: {amount}"));
            }
        }
        self.employee_rates.validate("employee")?;
        self.employer_rates.validate("employer")?;

        let Some((last, rest)) = self.brackets.split_last() else {
            return Err(anyhow!("Schedule has no tax brackets"));
        };
        for (i, bracket) in rest.iter().enumerate() {
            if !(bracket.width.is_finite() && bracket.width > 0.0) {
                return Err(anyhow!("Invalid width in bracket #{i}: {}", bracket.width));
            }
        }
        if last.width != f64::INFINITY {
            return Err(anyhow!(
                "Last bracket must be unbounded, found width {}",
                last.width
            ));
        }
        for (i, bracket) in self.brackets.iter().enumerate() {
            if !(0.0..=1.0).contains(&bracket.rate) {
                return Err(anyhow!("Invalid rate in bracket #{i}: {}", bracket.rate));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsuranceRates {
    #[serde(rename = "BHXH")]
    pub social: f64,
    #[serde(rename = "BHYT")]
    pub health: f64,
    #[serde(rename = "BHTN")]
    pub unemployment: f64,
}

impl InsuranceRates {
    pub fn total(&self) -> f64 {
        self.social + self.health + self.unemployment
    }

    pub fn apply(&self, base: f64) -> Contributions {
        Contributions {
            social: base * self.social,
            health: base * self.health,
            unemployment: base * self.unemployment,
        }
    }

    fn validate(&self, who: &str) -> anyhow::Result<()> {
        for (name, rate) in [
            ("BHXH", self.social),
            ("BHYT", self.health),
            ("BHTN", self.unemployment),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(anyhow!("Invalid {who} {name} rate: {rate}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Contributions {
    pub social: f64,
    pub health: f64,
    pub unemployment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaxBracket {
    /// Amount of income covered by this bracket, not a cumulative ceiling.
    #[serde(with = "unbounded")]
    pub width: f64,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(width: f64, rate: f64) -> Self {
        Self { width, rate }
    }
}

// JSON has no infinity, so an unbounded width is written as null.
mod unbounded {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(width: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if width.is_infinite() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(width)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
