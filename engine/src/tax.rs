use crate::schedule::TaxBracket;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBreakdownLine {
    pub rate: f64,
    pub taxable: f64,
    pub tax: f64,
}

/// Only brackets that received some income produce a line, so a non-positive
/// income yields an empty breakdown and no tax.
pub fn calculate_tax(
    brackets: &[TaxBracket],
    taxable_income: f64,
) -> (Vec<TaxBreakdownLine>, f64) {
    let mut breakdown = Vec::new();
    let mut remaining = taxable_income;
    let mut total = 0.0;

    for bracket in brackets {
        if remaining <= 0.0 {
            break;
        }
        let applied = bracket.width.min(remaining);
        let tax = applied * bracket.rate;
        breakdown.push(TaxBreakdownLine {
            rate: bracket.rate,
            taxable: applied,
            tax,
        });
        total += tax;
        remaining -= applied;
    }

    (breakdown, total)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schedule::Schedule;

    fn brackets() -> Vec<TaxBracket> {
        Schedule::default().brackets
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn no_income() {
        for income in [0.0, -5_000.0] {
            let (breakdown, total) = calculate_tax(&brackets(), income);
            assert!(breakdown.is_empty());
            assert_eq!(total, 0.0);
        }
    }

    #[test]
    fn first_bracket() {
        let (breakdown, total) = calculate_tax(&brackets(), 4_000_000.0);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].rate, 0.05);
        assert_eq!(breakdown[0].taxable, 4_000_000.0);
        assert_close(breakdown[0].tax, 200_000.0);
        assert_close(total, 200_000.0);
    }

    #[test]
    fn exact_bracket_boundary() {
        let (breakdown, total) = calculate_tax(&brackets(), 10_000_000.0);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[1].taxable, 5_000_000.0);
        assert_close(total, 750_000.0);
    }

    #[test]
    fn two_brackets() {
        let (breakdown, total) = calculate_tax(&brackets(), 6_900_000.0);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].taxable, 5_000_000.0);
        assert_close(breakdown[0].tax, 250_000.0);
        assert_eq!(breakdown[1].taxable, 1_900_000.0);
        assert_close(breakdown[1].tax, 190_000.0);
        assert_close(total, 440_000.0);
    }

    #[test]
    fn top_bracket() {
        // 5 + 5 + 8 + 14 + 20 + 28 = 80 million before the last bracket.
        let (breakdown, total) = calculate_tax(&brackets(), 100_000_000.0);
        assert_eq!(breakdown.len(), 7);
        assert_eq!(breakdown[6].rate, 0.35);
        assert_eq!(breakdown[6].taxable, 20_000_000.0);

        let expected = 250_000.0
            + 500_000.0
            + 1_200_000.0
            + 2_800_000.0
            + 5_000_000.0
            + 8_400_000.0
            + 7_000_000.0;
        assert_close(total, expected);
    }

    #[test]
    fn flat_single_bracket() {
        let flat = [TaxBracket::new(f64::INFINITY, 0.1)];
        let (breakdown, total) = calculate_tax(&flat, 1e9);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].taxable, 1e9);
        assert_close(total, 1e8);
    }
}
