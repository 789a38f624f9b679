use pit_engine::{CalculationInputs, CalculationResult, Contributions};

pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

fn format_contributions(contributions: &Contributions) -> String {
    format!(
        "BHXH {}, BHYT {}, BHTN {}",
        format_vnd(contributions.social),
        format_vnd(contributions.health),
        format_vnd(contributions.unemployment)
    )
}

pub fn render_result(inputs: &CalculationInputs, result: &CalculationResult) -> String {
    let mut out = format!(
        "### Result ({} {} income of {} VND, {} dependent(s), insurance {}) ###\n\n",
        inputs.period,
        inputs.mode,
        format_vnd(inputs.income),
        inputs.dependents,
        if inputs.insurance { "on" } else { "off" }
    );
    out.push_str(&format!("Gross: {:>15} VND\n", format_vnd(result.gross_monthly)));
    out.push_str(&format!("Net:   {:>15} VND\n", format_vnd(result.net_monthly)));
    out.push_str(&format!("Tax:   {:>15} VND\n\n", format_vnd(result.total_tax)));

    out.push_str("Breakdown:\n");
    if result.breakdown.is_empty() {
        out.push_str("  no taxable income\n");
    }
    for line in &result.breakdown {
        out.push_str(&format!(
            "  {:>4} of {:>12} → {:>12}\n",
            format_rate(line.rate),
            format_vnd(line.taxable),
            format_vnd(line.tax)
        ));
    }
    out.push('\n');

    out.push_str(&format!(
        "Insurance base:     {} VND\n",
        format_vnd(result.insurance_base)
    ));
    out.push_str(&format!(
        "Employee insurance: {} VND ({})\n",
        format_vnd(result.employee_insurance),
        format_contributions(&result.employee_contributions)
    ));
    out.push_str(&format!(
        "Employer insurance: {} VND ({})\n",
        format_vnd(result.employer_insurance),
        format_contributions(&result.employer_contributions)
    ));
    out.push_str(&format!(
        "Total deductions:   {} VND\n",
        format_vnd(result.total_deductions)
    ));
    out.push_str(&format!(
        "Taxable income:     {} VND\n",
        format_vnd(result.taxable_income)
    ));
    out.push_str(&format!(
        "Effective tax rate: {:.2}%\n",
        result.effective_tax_rate * 100.0
    ));
    out.push_str(&format!(
        "Total labor cost:   {} VND\n",
        format_vnd(result.total_labor_cost)
    ));
    out
}
