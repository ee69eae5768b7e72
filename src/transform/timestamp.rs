//! Timestamp normalization to Koinly's fixed UTC format.
//!
//! Output is always `YYYY-MM-DD HH:MM:SS`, 24-hour, zero-padded, no timezone
//! suffix (the output is defined to be UTC). Two entry points with different
//! leniency:
//!
//! - [`to_utc_string`] - best-effort parse over the layouts seen in explorer
//!   exports, with optional assumed-timezone localization (per-row converter)
//! - [`reformat`] - strict reparse of an already well-formed timestamp
//!   (aggregate pipeline)

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Koinly's preferred date format.
const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive date-time layouts tried in order. `%.f` also matches the
/// no-fraction case.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

/// Date-only layouts; time-of-day defaults to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%b %d, %Y"];

/// Offset-carrying layouts beyond RFC 3339/2822.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Normalize a loosely-formatted timestamp to UTC.
///
/// If the value carries a timezone or offset it converts to UTC directly.
/// A naive value is localized to `assumed_tz` (then converted to UTC) when one
/// is configured, otherwise treated as already UTC. Unparseable input returns
/// an empty string; the caller keeps the row and leaves its Date empty.
pub fn to_utc_string(raw: &str, assumed_tz: Option<Tz>) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Some(utc) = parse_with_offset(raw) {
        return utc.format(OUTPUT_FORMAT).to_string();
    }

    if let Some(naive) = parse_naive(raw) {
        let utc = match assumed_tz {
            Some(tz) => localize(naive, tz),
            None => Utc.from_utc_datetime(&naive),
        };
        return utc.format(OUTPUT_FORMAT).to_string();
    }

    String::new()
}

/// Reformat an already well-formed timestamp to the fixed output layout.
///
/// No timezone localization is applied; the input is expected to be
/// effectively UTC. Failure returns an empty string.
pub fn reformat(raw: &str) -> String {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format(OUTPUT_FORMAT).to_string();
    }

    match parse_naive(raw) {
        Some(naive) => naive.format(OUTPUT_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Try the offset-aware layouts; result is already UTC.
fn parse_with_offset(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    None
}

/// Try the naive layouts, then date-only layouts at midnight.
fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_hms_opt(0, 0, 0)?);
        }
    }
    None
}

/// Localize a naive timestamp to a timezone and convert to UTC.
///
/// DST-ambiguous local times take the earlier offset; local times that fall
/// into a DST gap fall back to reading the value as UTC.
fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_without_assumed_tz_is_utc() {
        assert_eq!(
            to_utc_string("2024-12-26 19:36:19", None),
            "2024-12-26 19:36:19"
        );
    }

    #[test]
    fn test_naive_with_assumed_tz_converts() {
        // Madrid is UTC+1 in December
        let tz: Tz = "Europe/Madrid".parse().unwrap();
        assert_eq!(
            to_utc_string("2024-12-26 19:36:19", Some(tz)),
            "2024-12-26 18:36:19"
        );
    }

    #[test]
    fn test_offset_input_converts_to_utc() {
        assert_eq!(
            to_utc_string("2024-12-26T19:36:19+02:00", None),
            "2024-12-26 17:36:19"
        );
        // assumed tz is ignored when the value carries its own offset
        let tz: Tz = "Europe/Madrid".parse().unwrap();
        assert_eq!(
            to_utc_string("2024-12-26T19:36:19Z", Some(tz)),
            "2024-12-26 19:36:19"
        );
    }

    #[test]
    fn test_loose_layouts() {
        assert_eq!(
            to_utc_string("2024/12/26 19:36:19", None),
            "2024-12-26 19:36:19"
        );
        assert_eq!(
            to_utc_string("26/12/2024 19:36", None),
            "2024-12-26 19:36:00"
        );
        assert_eq!(
            to_utc_string("Dec 26, 2024 19:36:19", None),
            "2024-12-26 19:36:19"
        );
        assert_eq!(to_utc_string("2024-12-26", None), "2024-12-26 00:00:00");
    }

    #[test]
    fn test_fractional_seconds_dropped() {
        assert_eq!(
            to_utc_string("2024-12-26 19:36:19.123", None),
            "2024-12-26 19:36:19"
        );
    }

    #[test]
    fn test_unparseable_becomes_empty() {
        assert_eq!(to_utc_string("not a date", None), "");
        assert_eq!(to_utc_string("", None), "");
    }

    #[test]
    fn test_reformat_strict() {
        assert_eq!(reformat("2024-01-01 00:00:00"), "2024-01-01 00:00:00");
        assert_eq!(reformat("2024-01-01T12:30:00Z"), "2024-01-01 12:30:00");
        assert_eq!(reformat("garbage"), "");
    }
}
