// Utility helpers for numeric cells and display formatting.
//
// Display strings follow the Brazilian convention used by the report:
// period as thousands separator, comma as decimal marker (`US$ 1.234,56`).
use num_format::{Locale, ToFormattedString};

/// Parse a numeric cell of the export file.
///
/// - Trims whitespace.
/// - Empty cells and `NaN` mean "no trade" and read as `0.0`.
/// - Returns `None` for anything else that is not a number, so the caller
///   can report the offending cell.
pub fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Some(0.0);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Money with two decimals and the `US$` prefix, e.g. `US$ 1.234,50`.
pub fn format_currency(value: f64) -> String {
    format!("US$ {}", format_number(value, 2))
}

/// Whole quantity with period grouping, e.g. `1.234.567`.
///
/// Fractional input is rounded half away from zero before grouping.
pub fn format_integer(value: f64) -> String {
    format_number(value.round(), 0)
}

/// Amount expressed in millions with two decimals, used for chart labels.
pub fn format_millions(value: f64) -> String {
    format_number(value / 1_000_000.0, 2)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed-decimal rendering first (`1234567.89`), then regroup the integer
    // part and swap the decimal marker.
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (s.as_str(), None),
    };
    let mut res = group_digits(int_part);
    if let Some(frac) = frac_part {
        res.push(',');
        res.push_str(frac);
    }
    // A value that rounds to zero never carries a sign.
    let rounds_to_zero = s.bytes().all(|b| b == b'0' || b == b'.');
    if n.is_sign_negative() && !rounds_to_zero {
        format!("-{}", res)
    } else {
        res
    }
}

/// Insert a period every three digits from the right of a digit string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

pub fn format_count<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // `num-format` groups with the English separator; the report uses periods.
    n.to_formatted_string(&Locale::en).replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_examples() {
        assert_eq!(format_currency(1234.5), "US$ 1.234,50");
        assert_eq!(format_currency(0.0), "US$ 0,00");
        assert_eq!(format_currency(42_857_123.456), "US$ 42.857.123,46");
        assert_eq!(format_currency(999.999), "US$ 1.000,00");
    }

    #[test]
    fn currency_negative_and_negative_zero() {
        assert_eq!(format_currency(-1234.567), "US$ -1.234,57");
        assert_eq!(format_currency(-0.001), "US$ 0,00");
        assert_eq!(format_currency(-0.0), "US$ 0,00");
    }

    #[test]
    fn integer_examples() {
        assert_eq!(format_integer(1_234_567.0), "1.234.567");
        assert_eq!(format_integer(0.0), "0");
        assert_eq!(format_integer(999.0), "999");
        assert_eq!(format_integer(-25_000.0), "-25.000");
    }

    #[test]
    fn values_beyond_i64_keep_their_digits() {
        assert_eq!(format_currency(1e19), "US$ 10.000.000.000.000.000.000,00");
        assert_eq!(format_integer(1e19), "10.000.000.000.000.000.000");
        assert_eq!(format_integer(-1e19), "-10.000.000.000.000.000.000");
    }

    #[test]
    fn integer_rounds_half_away_from_zero() {
        assert_eq!(format_integer(1234.4), "1.234");
        assert_eq!(format_integer(1234.5), "1.235");
        assert_eq!(format_integer(-2.5), "-3");
        assert_eq!(format_integer(-0.4), "0");
    }

    #[test]
    fn millions_and_counts() {
        assert_eq!(format_millions(42_860_000.0), "42,86");
        assert_eq!(format_count(9855usize), "9.855");
    }

    #[test]
    fn parse_amount_sentinels_and_errors() {
        assert_eq!(parse_amount(" 120 "), Some(120.0));
        assert_eq!(parse_amount("35.5"), Some(35.5));
        assert_eq!(parse_amount(""), Some(0.0));
        assert_eq!(parse_amount("NaN"), Some(0.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("-infinity"), None);
        assert_eq!(parse_amount("1e400"), None);
    }
}
