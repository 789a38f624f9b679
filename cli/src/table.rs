use crate::report::format_vnd;
use log::debug;
use pit_engine::Engine;

const EXAMPLE_GROSS: [f64; 6] = [
    10_000_000.0,
    20_000_000.0,
    36_000_000.0,
    50_000_000.0,
    100_000_000.0,
    200_000_000.0,
];

const EXAMPLE_DEPENDENTS: [u32; 3] = [0, 1, 2];

#[derive(Debug, Clone, Copy)]
pub struct ExampleRow {
    pub gross: f64,
    pub dependents: u32,
    pub insurance: f64,
    pub tax: f64,
    pub net: f64,
    pub effective_rate: f64,
}

pub fn example_rows(engine: &Engine) -> Vec<ExampleRow> {
    EXAMPLE_GROSS
        .iter()
        .flat_map(|&gross| {
            EXAMPLE_DEPENDENTS.iter().map(move |&dependents| {
                let result = engine.project(gross, dependents, true);
                debug!("Example {gross} with {dependents} dependent(s): {result:?}");
                ExampleRow {
                    gross,
                    dependents,
                    insurance: result.employee_insurance,
                    tax: result.total_tax,
                    net: result.net_monthly,
                    effective_rate: result.effective_tax_rate,
                }
            })
        })
        .collect()
}

pub fn print_examples(engine: &Engine) {
    println!("### Monthly examples (insured) ###");
    println!("|       gross | dep. |   insurance |         tax |         net | eff. |");
    for row in example_rows(engine) {
        println!(
            "| {:>11} | {:>4} | {:>11} | {:>11} | {:>11} | {:>4.1}% |",
            format_vnd(row.gross),
            row.dependents,
            format_vnd(row.insurance),
            format_vnd(row.tax),
            format_vnd(row.net),
            row.effective_rate * 100.0,
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rows() {
        let rows = example_rows(&Engine::default());
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[0].gross, 10_000_000.0);
        assert_eq!(rows[0].tax, 0.0);

        let row = rows[3];
        assert_eq!(row.gross, 20_000_000.0);
        assert_eq!(row.dependents, 0);
        assert!((row.net - 17_460_000.0).abs() < 1e-6);

        // More dependents never mean more tax.
        for chunk in rows.chunks(3) {
            assert!(chunk[0].tax >= chunk[1].tax);
            assert!(chunk[1].tax >= chunk[2].tax);
        }
    }
}
