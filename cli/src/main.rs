#![forbid(unsafe_code)]

mod amount;
mod export;
mod load;
mod plot;
mod report;
mod table;
mod wizard;

use amount::parse_amount;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use export::export_csv;
use load::load_schedule;
use log::info;
use pit_engine::{Engine, Period, SalaryMode};
use plot::plot_net_curve;
use report::render_result;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use table::print_examples;
use wizard::{Answers, Wizard};

/// Vietnam personal income tax calculator.
#[derive(Parser, Debug)]
#[command(name = "pit-vietnam", version, about)]
struct Cli {
    /// JSON schedule (deductions, insurance rates, brackets) to use instead of
    /// the statutory one.
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the tax of one salary, asking for any missing input.
    Calculate(CalculateArgs),
    /// Print a table of example salaries.
    Table,
    /// Plot net pay, tax and insurance against the gross salary.
    Plot(PlotArgs),
    /// Print the active schedule as JSON.
    Schedule,
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Whether the income is the gross salary or the net salary to solve for.
    #[arg(long)]
    mode: Option<SalaryMode>,
    /// Period the income is expressed over.
    #[arg(long)]
    period: Option<Period>,
    /// Income in VND, e.g. 20000000, 20,000,000 or 20tr.
    #[arg(long, value_parser = parse_amount)]
    income: Option<f64>,
    #[arg(long)]
    dependents: Option<u32>,
    /// Don't pay social insurance.
    #[arg(long)]
    no_insurance: bool,
    /// Write the result to this CSV file.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[arg(long, default_value = "plots/net-curve.png")]
    output: PathBuf,
    #[arg(long, value_parser = parse_amount, default_value = "150000000")]
    max_gross: f64,
    #[arg(long, default_value_t = 0)]
    dependents: u32,
    #[arg(long)]
    no_insurance: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let engine = Engine::new(load_schedule(cli.schedule.as_deref())?)?;

    match cli.command {
        Command::Calculate(args) => {
            let stdin = io::stdin();
            calculate(&engine, args, stdin.lock(), io::stdout())
        }
        Command::Table => {
            print_examples(&engine);
            Ok(())
        }
        Command::Plot(args) => plot_net_curve(
            &engine,
            &args.output,
            args.max_gross,
            args.dependents,
            !args.no_insurance,
        ),
        Command::Schedule => {
            println!("{}", serde_json::to_string_pretty(engine.schedule())?);
            Ok(())
        }
    }
}

impl CalculateArgs {
    fn answers(&self) -> Answers {
        Answers {
            mode: self.mode,
            period: self.period,
            income: self.income,
            dependents: self.dependents,
            insurance: self.no_insurance.then_some(false),
        }
    }
}

fn calculate<R: BufRead, W: Write>(
    engine: &Engine,
    args: CalculateArgs,
    input: R,
    output: W,
) -> Result<()> {
    let mut wizard = Wizard::new(input, output);
    let inputs = wizard.complete(args.answers())?;
    inputs.validate()?;

    let result = engine.compute_result(&inputs);
    info!(
        "Computed gross {} / net {}",
        result.gross_monthly, result.net_monthly
    );
    wizard.show(&format!("\n{}", render_result(&inputs, &result)))?;

    let export = match args.export {
        Some(path) => Some(path),
        None if wizard.prompted() => wizard.ask_export()?,
        None => None,
    };
    if let Some(path) = export {
        export_csv(&path, &inputs, &result)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn args(export: Option<PathBuf>) -> CalculateArgs {
        CalculateArgs {
            mode: Some(SalaryMode::Gross),
            period: Some(Period::Monthly),
            income: Some(20_000_000.0),
            dependents: Some(0),
            no_insurance: false,
            export,
        }
    }

    fn run(args: CalculateArgs, typed: &str) -> (Result<()>, String) {
        let mut output = Vec::new();
        let status = calculate(&Engine::default(), args, Cursor::new(typed), &mut output);
        (status, String::from_utf8(output).unwrap())
    }

    #[test]
    fn insurance_answer_from_flag() {
        assert_eq!(args(None).answers().insurance, None);

        let uninsured = CalculateArgs {
            no_insurance: true,
            ..args(None)
        };
        assert_eq!(uninsured.answers().insurance, Some(false));
    }

    #[test]
    fn all_flags_no_prompt() {
        let (status, screen) = run(args(None), "");
        status.unwrap();
        assert!(screen.contains("Net:        17,460,000 VND"), "{screen}");
        assert!(!screen.contains("Choice"));
        assert!(!screen.contains("export"));
    }

    #[test]
    fn export_flag_skips_prompt() {
        let path = std::env::temp_dir().join("pit-vietnam-export-flag.csv");
        let uninsured = CalculateArgs {
            no_insurance: true,
            ..args(Some(path.clone()))
        };
        let (status, screen) = run(uninsured, "");
        status.unwrap();
        assert!(!screen.contains("Enter to export"));

        let csv = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(csv.contains("insurance,false\n"));
        assert!(csv.contains("employee_insurance,0\n"));
    }

    #[test]
    fn prompted_run_offers_export() {
        let missing = CalculateArgs {
            income: None,
            ..args(None)
        };
        let (status, screen) = run(missing, "20m\n\nq\n");
        status.unwrap();
        assert!(screen.contains("Monthly gross income (VND): "));
        assert!(screen.contains("Social insurance:"));
        assert!(screen.contains("Enter to export CSV"));
    }

    #[test]
    fn no_insurance_flag_not_asked() {
        let missing = CalculateArgs {
            income: None,
            no_insurance: true,
            ..args(None)
        };
        let (status, screen) = run(missing, "20m\nq\n");
        status.unwrap();
        assert!(!screen.contains("Social insurance"));
        assert!(screen.contains("insurance off"));
    }

    #[test]
    fn reject_negative_income() {
        let (status, _) = run(
            CalculateArgs {
                income: Some(-1.0),
                ..args(None)
            },
            "",
        );
        assert!(status.is_err());
    }
}
