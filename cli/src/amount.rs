use anyhow::anyhow;
use log::warn;
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::{char, digit1, multispace0, one_of};
use nom::combinator::{map_res, opt, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};

/// Parses a typed-in amount of VND.
///
/// Accepts digit groups separated by `,`, `_` or spaces, an optional decimal
/// part, and a scale suffix: `k`, `m`/`tr`/`triệu` or `b`/`ty`/`tỷ`.
pub fn parse_amount(text: &str) -> anyhow::Result<f64> {
    match delimited(multispace0, amount, multispace0).parse(text) {
        Ok((remainder, amount)) => {
            if !remainder.is_empty() {
                warn!("Incomplete parsing, amount: {amount}, remainder: {remainder}");
                Err(anyhow!("Unexpected trailing input in amount: {remainder:?}"))
            } else if !amount.is_finite() {
                Err(anyhow!("Amount out of range: {text:?}"))
            } else {
                Ok(amount)
            }
        }
        Err(e) => {
            warn!("Failed to parse amount {text:?}: {e:?}");
            Err(anyhow!("Invalid amount: {text:?}"))
        }
    }
}

fn amount(i: &str) -> IResult<&str, f64> {
    let (i, number) = number(i)?;
    let (i, scale) = opt(preceded(multispace0, scale)).parse(i)?;
    Ok((i, number * scale.unwrap_or(1.0)))
}

fn number(i: &str) -> IResult<&str, f64> {
    map_res(
        pair(
            separated_list1(one_of(",_ "), digit1),
            opt(preceded(char('.'), digit1)),
        ),
        |(groups, decimals): (Vec<&str>, Option<&str>)| {
            let mut digits = groups.concat();
            if let Some(decimals) = decimals {
                digits.push('.');
                digits.push_str(decimals);
            }
            match digits.parse::<f64>() {
                Ok(x) if x.is_finite() => Ok(x),
                Ok(x) => Err(format!("Amount out of range: {x}")),
                Err(e) => Err(e.to_string()),
            }
        },
    )
    .parse(i)
}

fn scale(i: &str) -> IResult<&str, f64> {
    alt((
        value(1e6, alt((tag("triệu"), tag_no_case("trieu"), tag_no_case("tr")))),
        value(1e9, alt((tag("tỷ"), tag_no_case("ty")))),
        value(1e3, tag_no_case("k")),
        value(1e6, tag_no_case("m")),
        value(1e9, tag_no_case("b")),
    ))
    .parse(i)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_plain() {
        assert_eq!(parse_amount("20000000").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("  20000000 ").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn parse_separators() {
        assert_eq!(parse_amount("20,000,000").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("20_000_000").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("20 000 000").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("1,234.5").unwrap(), 1_234.5);
    }

    #[test]
    fn parse_suffixes() {
        assert_eq!(parse_amount("20m").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("20 tr").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("20 triệu").unwrap(), 20_000_000.0);
        assert_eq!(parse_amount("1.5tr").unwrap(), 1_500_000.0);
        assert_eq!(parse_amount("500k").unwrap(), 500_000.0);
        assert_eq!(parse_amount("2 tỷ").unwrap(), 2_000_000_000.0);
        assert_eq!(parse_amount("2B").unwrap(), 2_000_000_000.0);
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("20x").is_err());
        assert!(parse_amount("20m extra").is_err());
    }

    #[test]
    fn reject_overflow() {
        assert!(parse_amount(&format!("1{}", "0".repeat(400))).is_err());
        // Finite digits, but out of range once scaled.
        assert!(parse_amount(&format!("1{} tỷ", "0".repeat(305))).is_err());
    }
}
