use crate::amount::parse_amount;
use crate::export::DEFAULT_EXPORT_PATH;
use anyhow::{Result, anyhow};
use log::{debug, warn};
use pit_engine::{CalculationInputs, Period, SalaryMode};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Copy)]
pub struct Answers {
    pub mode: Option<SalaryMode>,
    pub period: Option<Period>,
    pub income: Option<f64>,
    pub dependents: Option<u32>,
    pub insurance: Option<bool>,
}

pub struct Wizard<R, W> {
    input: R,
    output: W,
    prompted: bool,
}

impl<R: BufRead, W: Write> Wizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            prompted: false,
        }
    }

    pub fn prompted(&self) -> bool {
        self.prompted
    }

    pub fn complete(&mut self, answers: Answers) -> Result<CalculationInputs> {
        let mode = match answers.mode {
            Some(mode) => mode,
            None => self.choose(
                "Salary mode",
                &[("Gross → Net", SalaryMode::Gross), ("Net → Gross", SalaryMode::Net)],
            )?,
        };
        let period = match answers.period {
            Some(period) => period,
            None => self.choose(
                "Period",
                &[("Monthly", Period::Monthly), ("Annual", Period::Annual)],
            )?,
        };
        let income = match answers.income {
            Some(income) => income,
            None => {
                let question = format!("{} {mode} income (VND)", capitalize(period));
                self.ask(&question, parse_amount)?
            }
        };
        let dependents = match answers.dependents {
            Some(dependents) => dependents,
            None => self.ask("Number of dependents", |text| {
                let text = text.trim();
                if text.is_empty() {
                    Ok(0)
                } else {
                    text.parse::<u32>()
                        .map_err(|e| anyhow!("Invalid number of dependents {text:?}: {e}"))
                }
            })?,
        };
        let insurance = match answers.insurance {
            Some(insurance) => insurance,
            None if self.prompted => {
                self.choose("Social insurance", &[("Yes", true), ("No", false)])?
            }
            None => true,
        };

        let inputs = CalculationInputs {
            mode,
            period,
            income,
            dependents,
            insurance,
        };
        debug!("Wizard inputs: {inputs:?}");
        Ok(inputs)
    }

    pub fn show(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Asks where to export the result. Returns `None` if the user quits.
    pub fn ask_export(&mut self) -> Result<Option<PathBuf>> {
        let answer = self.read_answer(&format!(
            "Enter to export CSV to {DEFAULT_EXPORT_PATH}, a path to export elsewhere, q to quit"
        ))?;
        Ok(match answer.as_str() {
            "" => Some(PathBuf::from(DEFAULT_EXPORT_PATH)),
            "q" => None,
            path => Some(PathBuf::from(path)),
        })
    }

    fn choose<T: Copy>(&mut self, title: &str, options: &[(&str, T)]) -> Result<T> {
        writeln!(self.output, "{title}:")?;
        for (i, (label, _)) in options.iter().enumerate() {
            writeln!(self.output, "  [{}] {label}", i + 1)?;
        }
        self.ask("Choice (Enter for 1)", |text| {
            let index = if text.is_empty() {
                0
            } else {
                text.parse::<usize>()
                    .ok()
                    .filter(|&i| (1..=options.len()).contains(&i))
                    .ok_or_else(|| anyhow!("Expected a number from 1 to {}", options.len()))?
                    - 1
            };
            Ok(options[index].1)
        })
    }

    fn ask<T>(&mut self, question: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
        loop {
            let answer = self.read_answer(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Rejected answer {answer:?}: {e}");
                    writeln!(self.output, "{e}")?;
                }
            }
        }
    }

    fn read_answer(&mut self, question: &str) -> Result<String> {
        self.prompted = true;
        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(anyhow!("Unexpected end of input"));
        }
        Ok(line.trim().to_owned())
    }
}

fn capitalize(period: Period) -> &'static str {
    match period {
        Period::Monthly => "Monthly",
        Period::Annual => "Annual",
    }
}
