//! Amount parsing and formatting.
//!
//! Explorer exports write amounts as integer micro-denomination counts with
//! `.` used as a thousands separator, never as a decimal point:
//! `"22.000.000"` is 22,000,000 usaga, i.e. 22 SAGA.

/// Parse a micro-denomination amount string and convert it to the standard
/// denomination.
///
/// Strips every `.`, parses the remainder as an integer count of micro-units
/// and multiplies by `factor` (1e-6 for usaga -> SAGA). A string that does not
/// survive the integer parse degrades to `0.0`; the failure is never
/// propagated.
pub fn parse_micro_amount(raw: &str, factor: f64) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '.').collect();
    match cleaned.parse::<i64>() {
        Ok(micro) => micro as f64 * factor,
        Err(_) => 0.0,
    }
}

/// Parse an amount that is already in its final denomination.
///
/// Used by the aggregate pipeline, which sums amounts as-is without unit
/// conversion. Failure degrades to `0.0`.
pub fn parse_plain_amount(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Format an amount in decimal notation without trailing zeros.
///
/// `8.0` -> `"8"`, `1.5` -> `"1.5"`.
pub fn format_amount(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MICRO: f64 = 1e-6;

    #[test]
    fn test_thousands_separators_stripped() {
        assert_eq!(parse_micro_amount("22.000.000", MICRO), 22.0);
        assert_eq!(parse_micro_amount("1.500.000", MICRO), 1.5);
        assert_eq!(parse_micro_amount("500000", MICRO), 0.5);
    }

    #[test]
    fn test_malformed_amount_degrades_to_zero() {
        assert_eq!(parse_micro_amount("", MICRO), 0.0);
        assert_eq!(parse_micro_amount("abc", MICRO), 0.0);
        assert_eq!(parse_micro_amount("12,000", MICRO), 0.0);
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(parse_micro_amount("-1.000.000", MICRO), -1.0);
    }

    #[test]
    fn test_plain_amount() {
        assert_eq!(parse_plain_amount("5"), 5.0);
        assert_eq!(parse_plain_amount("3.25"), 3.25);
        assert_eq!(parse_plain_amount("not a number"), 0.0);
    }

    #[test]
    fn test_format_amount_trims_trailing_zeros() {
        assert_eq!(format_amount(8.0), "8");
        assert_eq!(format_amount(1.5), "1.5");
        assert_eq!(format_amount(0.000001), "0.000001");
    }
}
