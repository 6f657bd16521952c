//! Decimal/thousands separator disambiguation.
//!
//! Rules are applied in a fixed order; reordering them changes results for
//! inputs like `1.234` (decimal) versus `1,234` (thousands).

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

/// Upper sanity bound used when no configuration overrides it.
pub fn default_max_amount() -> Decimal {
    Decimal::from(10_000_000u32)
}

/// Rewrite a raw numeric token so that `.` is the only separator left and it
/// marks the decimal point.
///
/// The input is expected to hold only ASCII digits, `.` and `,`.
pub fn normalize_separators(raw: &str) -> String {
    let dots = raw.matches('.').count();
    let commas = raw.matches(',').count();

    if dots > 0 && commas > 0 {
        // Whichever separator comes last is the decimal one.
        let last_dot = raw.rfind('.');
        let last_comma = raw.rfind(',');
        if last_dot > last_comma {
            raw.replace(',', "")
        } else {
            raw.replace('.', "").replace(',', ".")
        }
    } else if dots > 1 {
        raw.replace('.', "")
    } else if commas > 1 {
        raw.replace(',', "")
    } else if commas == 1 {
        let fraction_len = raw.rsplit(',').next().map_or(0, str::len);
        if fraction_len <= 2 {
            raw.replace(',', ".")
        } else {
            raw.replace(',', "")
        }
    } else {
        raw.to_string()
    }
}

/// Parse a raw numeric token into a decimal, without range checks.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let normalized = normalize_separators(raw);
    match Decimal::from_str(&normalized) {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("Could not parse normalized {:?} (from {:?}): {}", normalized, raw, e);
            None
        }
    }
}

/// Parse a raw numeric token and keep it only if it lies in `[0, max_amount)`.
pub fn normalize_amount(raw: &str, max_amount: Decimal) -> Option<Decimal> {
    let value = parse_number(raw)?;
    if value.is_sign_negative() || value >= max_amount {
        trace!("Dropping out-of-range amount {} (from {:?})", value, raw);
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_mixed_separators_last_one_is_decimal() {
        assert_eq!(parse_number("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_number("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_number("12.345.678,9"), Some(dec("12345678.9")));
    }

    #[test]
    fn test_repeated_separator_is_thousands() {
        assert_eq!(parse_number("1.234.567"), Some(dec("1234567")));
        assert_eq!(parse_number("1,234,567"), Some(dec("1234567")));
    }

    #[test]
    fn test_single_comma_depends_on_fraction_length() {
        assert_eq!(parse_number("45,00"), Some(dec("45.00")));
        assert_eq!(parse_number("45,5"), Some(dec("45.5")));
        assert_eq!(parse_number("45,000"), Some(dec("45000")));
    }

    #[test]
    fn test_single_dot_is_always_decimal() {
        assert_eq!(parse_number("123.45"), Some(dec("123.45")));
        // Known ambiguity: a lone dot group reads as a fraction.
        assert_eq!(parse_number("1.234"), Some(dec("1.234")));
        assert_eq!(parse_number("42"), Some(dec("42")));
    }

    #[test]
    fn test_scale_is_preserved() {
        let value = parse_number("45,00").unwrap();
        assert_eq!(value.scale(), 2);
        assert_eq!(value.to_string(), "45.00");
    }

    #[test]
    fn test_rejects_foreign_characters() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-5"), None);
        assert_eq!(parse_number("1_000"), None);
        assert_eq!(parse_number("12a"), None);
    }

    #[test]
    fn test_range_bound_is_exclusive() {
        let max = default_max_amount();
        assert_eq!(normalize_amount("15,000,000", max), None);
        assert_eq!(normalize_amount("10.000.000", max), None);
        assert_eq!(normalize_amount("9.999.999,99", max), Some(dec("9999999.99")));
        assert_eq!(normalize_amount("0", max), Some(Decimal::ZERO));
    }

    #[test]
    fn test_overflowing_digit_runs_are_dropped() {
        let raw = "9".repeat(40);
        assert_eq!(normalize_amount(&raw, default_max_amount()), None);
    }
}
