//! Lenient date parsing for whois text.
//!
//! Registries print expiration dates in many layouts. `parse_date_string`
//! tries a fixed list of layouts against the whole input and returns the
//! first one that fits. Inputs without an offset are taken as UTC, and so are
//! inputs carrying only a zone abbreviation such as `PST` or `CLST`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

// `%B` accepts both full and abbreviated month names when parsing.

/// Layouts carrying an explicit numeric offset.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%a %b %d %H:%M:%S %z %Y",
];

/// Date-time layouts without an offset. Month-first slash layouts are tried
/// before day-first ones.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d-%B-%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%a %b %d %H:%M:%S %Y",
];

/// Date-only layouts.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y.%m.%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%d-%B-%Y",
    "%d %B %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
];

/// Zone names that may trail an otherwise parseable date.
const ZONE_SUFFIXES: &[&str] = &[" (UTC)", " UTC", " GMT"];

/// Attempts to parse a date string in various formats.
///
/// The whole input (ignoring surrounding whitespace) must match a layout;
/// trailing text makes the parse fail.
pub(crate) fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let s = date_str.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(dt) = parse_exact(s) {
        return Some(dt);
    }

    if let Some(dt) = strip_zone_name(s).and_then(|stripped| parse_exact(&stripped)) {
        return Some(dt);
    }

    ZONE_SUFFIXES.iter().find_map(|suffix| {
        s.strip_suffix(suffix)
            .and_then(|stripped| parse_exact(stripped.trim_end()))
    })
}

/// Removes a zone abbreviation that directly follows the time of day.
///
/// Handles both `2025-08-13 11:04:05 CLST` and the Unix `date` layout
/// `Wed Aug 13 04:00:00 GMT 2025`. Abbreviations are ambiguous, so the
/// remaining fields are read as UTC.
fn strip_zone_name(s: &str) -> Option<String> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let position = tokens.windows(2).position(|pair| {
        is_time_of_day(pair[0]) && is_zone_name(pair[1])
    })? + 1;

    let kept: Vec<&str> = tokens
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != position)
        .map(|(_, token)| *token)
        .collect();
    Some(kept.join(" "))
}

fn is_time_of_day(token: &str) -> bool {
    token.contains(':') && token.bytes().all(|b| b.is_ascii_digit() || b == b':' || b == b'.')
}

fn is_zone_name(token: &str) -> bool {
    let name = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(token);
    (1..=5).contains(&name.len()) && name.bytes().all(|b| b.is_ascii_uppercase())
}

fn parse_exact(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive_dt.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(naive_date) = NaiveDate::parse_from_str(s, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    // Compact YYYYMMDD; only for exactly eight digits so shorter runs do not
    // parse with single-digit fields.
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(naive_date) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_date_string_iso8601_with_millis() {
        assert_eq!(
            parse_date_string("2024-01-15T10:30:45.123Z")
                .unwrap()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            "2024-01-15 10:30:45"
        );
    }

    #[test]
    fn test_parse_date_string_iso8601_without_millis() {
        assert_eq!(
            parse_date_string("2024-08-13T04:00:00Z").unwrap(),
            utc(2024, 8, 13, 4, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_with_offset() {
        assert_eq!(
            parse_date_string("2024-08-13T06:00:00+02:00").unwrap(),
            utc(2024, 8, 13, 4, 0, 0)
        );
        assert_eq!(
            parse_date_string("2024-08-13 06:00:00+0200").unwrap(),
            utc(2024, 8, 13, 4, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_space_separated() {
        assert_eq!(
            parse_date_string("2024-01-15 10:30:45").unwrap(),
            utc(2024, 1, 15, 10, 30, 45)
        );
    }

    #[test]
    fn test_parse_date_string_trailing_zone_name() {
        assert_eq!(
            parse_date_string("2024-01-15 10:30:45 UTC").unwrap(),
            utc(2024, 1, 15, 10, 30, 45)
        );
        assert_eq!(
            parse_date_string("2024-01-15 GMT").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_zone_abbreviation() {
        assert_eq!(
            parse_date_string("2025-08-13 11:04:05 CLST").unwrap(),
            utc(2025, 8, 13, 11, 4, 5)
        );
        assert_eq!(
            parse_date_string("2025-08-13 04:00:00 PST").unwrap(),
            utc(2025, 8, 13, 4, 0, 0)
        );
        assert_eq!(
            parse_date_string("2025-08-13 04:00:00 +0000 UTC").unwrap(),
            utc(2025, 8, 13, 4, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_unix_date_layout() {
        assert_eq!(
            parse_date_string("Wed Aug 13 04:00:00 GMT 2025").unwrap(),
            utc(2025, 8, 13, 4, 0, 0)
        );
        assert_eq!(
            parse_date_string("Wed Aug 13 04:00:00 CEST 2025").unwrap(),
            utc(2025, 8, 13, 4, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_month_abbreviation_is_not_a_zone() {
        assert_eq!(
            parse_date_string("13 AUG 2025").unwrap(),
            utc(2025, 8, 13, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_date_only() {
        let dt = parse_date_string("2024-01-15").unwrap();
        assert_eq!(dt, utc(2024, 1, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_date_string_dotted_layouts() {
        assert_eq!(
            parse_date_string("2024.01.15").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parse_date_string("15.01.2024").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_month_names() {
        assert_eq!(
            parse_date_string("15-Jan-2024").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parse_date_string("15 January 2024").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parse_date_string("Jan 15 2024").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
        assert_eq!(
            parse_date_string("January 15, 2024").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_slashes_prefer_month_first() {
        assert_eq!(
            parse_date_string("02/03/2024").unwrap(),
            utc(2024, 2, 3, 0, 0, 0)
        );
        // Day-first fallback when the first field cannot be a month
        assert_eq!(
            parse_date_string("15/01/2024").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
    }

    #[test]
    fn test_parse_date_string_compact() {
        assert_eq!(
            parse_date_string("20240115").unwrap(),
            utc(2024, 1, 15, 0, 0, 0)
        );
        assert!(parse_date_string("2024011").is_none());
    }

    #[test]
    fn test_parse_date_string_rfc2822() {
        assert_eq!(
            parse_date_string("Mon, 15 Jan 2024 10:30:45 +0000").unwrap(),
            utc(2024, 1, 15, 10, 30, 45)
        );
    }

    #[test]
    fn test_parse_date_string_invalid() {
        assert!(parse_date_string("not a date").is_none());
    }

    #[test]
    fn test_parse_date_string_empty() {
        assert!(parse_date_string("").is_none());
        assert!(parse_date_string("   ").is_none());
    }

    #[test]
    fn test_parse_date_string_rejects_trailing_text() {
        assert!(parse_date_string("2024-01-15 and then some").is_none());
    }
}
