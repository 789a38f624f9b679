use anyhow::Result;
use log::info;
use pit_engine::{CalculationInputs, CalculationResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_EXPORT_PATH: &str = "pit-vietnam.csv";

#[derive(Serialize)]
struct Row<'a> {
    field: &'a str,
    value: String,
}

fn amount(x: f64) -> String {
    format!("{x:.0}")
}

pub fn write_csv<W: Write>(
    writer: W,
    inputs: &CalculationInputs,
    result: &CalculationResult,
) -> Result<()> {
    let bracket_fields: Vec<String> = result
        .breakdown
        .iter()
        .map(|line| format!("bracket_{:.0}%", line.rate * 100.0))
        .collect();

    let mut rows = vec![
        Row {
            field: "mode",
            value: inputs.mode.to_string(),
        },
        Row {
            field: "period",
            value: inputs.period.to_string(),
        },
        Row {
            field: "income",
            value: amount(inputs.income),
        },
        Row {
            field: "dependents",
            value: inputs.dependents.to_string(),
        },
        Row {
            field: "insurance",
            value: inputs.insurance.to_string(),
        },
    ];
    for (field, x) in [
        ("gross_monthly", result.gross_monthly),
        ("insurance_base", result.insurance_base),
        ("employee_insurance", result.employee_insurance),
        ("employer_insurance", result.employer_insurance),
        ("total_deductions", result.total_deductions),
        ("taxable_income", result.taxable_income),
        ("total_tax", result.total_tax),
        ("net_monthly", result.net_monthly),
        ("total_labor_cost", result.total_labor_cost),
    ] {
        rows.push(Row {
            field,
            value: amount(x),
        });
    }
    rows.push(Row {
        field: "effective_tax_rate",
        value: format!("{:.6}", result.effective_tax_rate),
    });

    for (field, line) in bracket_fields.iter().zip(&result.breakdown) {
        rows.push(Row {
            field,
            value: amount(line.tax),
        });
    }

    let mut out = csv::Writer::from_writer(writer);
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn export_csv(
    path: &Path,
    inputs: &CalculationInputs,
    result: &CalculationResult,
) -> Result<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), inputs, result)?;
    info!("Exported result to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use pit_engine::{Engine, Period, SalaryMode};

    fn export(inputs: &CalculationInputs) -> String {
        let result = Engine::default().compute_result(inputs);
        let mut buffer = Vec::new();
        write_csv(&mut buffer, inputs, &result).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn export_gross() {
        let csv = export(&CalculationInputs {
            mode: SalaryMode::Gross,
            period: Period::Monthly,
            income: 20_000_000.0,
            dependents: 0,
            insurance: true,
        });
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "field,value");
        assert_eq!(lines[1], "mode,gross");
        assert_eq!(lines[2], "period,monthly");
        assert_eq!(lines[3], "income,20000000");
        assert!(lines.contains(&"net_monthly,17460000"));
        assert!(lines.contains(&"total_tax,440000"));
        assert!(lines.contains(&"effective_tax_rate,0.022000"));
        assert!(lines.contains(&"bracket_5%,250000"));
        assert_eq!(lines.last(), Some(&"bracket_10%,190000"));
    }

    #[test]
    fn export_without_tax() {
        let csv = export(&CalculationInputs {
            mode: SalaryMode::Net,
            period: Period::Annual,
            income: 60_000_000.0,
            dependents: 1,
            insurance: false,
        });
        assert!(csv.contains("mode,net\n"));
        assert!(csv.contains("gross_monthly,5000000\n"));
        assert!(!csv.contains("bracket_"));
    }
}
