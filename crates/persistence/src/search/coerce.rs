//! Lenient coercion of raw query values.
//!
//! Every function here returns `None` for input that is absent, blank or
//! malformed, so the caller can treat the term as unset.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Returns the trimmed value, or `None` when absent or blank.
pub(crate) fn text(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a finite decimal. Accepts plain and scientific notation.
///
/// Finite values beyond the `Decimal` range saturate to `Decimal::MAX` or
/// `Decimal::MIN`; magnitudes too small to represent become zero.
pub(crate) fn decimal(raw: Option<&str>) -> Option<Decimal> {
    let value = text(raw)?;
    if let Ok(d) = Decimal::from_str(value) {
        return Some(d);
    }
    if let Ok(d) = Decimal::from_scientific(value) {
        return Some(d);
    }
    let f = value.parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(Decimal::try_from(f).unwrap_or_else(|_| saturate(f)))
}

fn saturate(f: f64) -> Decimal {
    if f.abs() < 1.0 {
        Decimal::ZERO
    } else if f.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Parses an integer. Finite fractional input is truncated toward zero.
pub(crate) fn integer(raw: Option<&str>) -> Option<i64> {
    let value = text(raw)?;
    if let Ok(i) = value.parse::<i64>() {
        return Some(i);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_blank_is_absent() {
        assert_eq!(text(None), None);
        assert_eq!(text(Some("")), None);
        assert_eq!(text(Some("   ")), None);
        assert_eq!(text(Some(" Elche ")), Some("Elche"));
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(decimal(Some("150000")), Some(Decimal::from(150_000)));
        assert_eq!(decimal(Some("1.5e5")), Some(Decimal::from(150_000)));
        assert_eq!(decimal(Some("99.95")), Decimal::from_str("99.95").ok());
        assert_eq!(decimal(Some("-10")), Some(Decimal::from(-10)));
    }

    #[test]
    fn test_decimal_rejects_garbage_and_non_finite() {
        for raw in ["abc", "NaN", "inf", "-infinity", "12abc", ""] {
            assert_eq!(decimal(Some(raw)), None, "{raw}");
        }
    }

    #[test]
    fn test_decimal_saturates_out_of_range() {
        assert_eq!(decimal(Some("1e30")), Some(Decimal::MAX));
        assert_eq!(decimal(Some("-1e30")), Some(Decimal::MIN));
        assert_eq!(
            decimal(Some("100000000000000000000000000000")),
            Some(Decimal::MAX)
        );
        assert_eq!(decimal(Some("1e308")), Some(Decimal::MAX));
        assert_eq!(decimal(Some("1e400")), None);
    }

    #[test]
    fn test_integer_truncates_fractions() {
        assert_eq!(integer(Some("3")), Some(3));
        assert_eq!(integer(Some("2.9")), Some(2));
        assert_eq!(integer(Some("-1")), Some(-1));
        assert_eq!(integer(Some("two")), None);
        assert_eq!(integer(Some("NaN")), None);
    }
}
