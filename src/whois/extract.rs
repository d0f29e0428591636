//! Expiration date extraction from raw whois text.
//!
//! There is no common schema across registries, so extraction is a
//! heuristic: find a line mentioning one of [`EXPIRATION_KEYWORDS`], then try
//! to parse a date starting at every character offset of that line. The first
//! offset of the first line that parses wins.

use chrono::{DateTime, Utc};

use super::parse::parse_date_string;

/// Lower-case phrases that precede an expiration field in common registry
/// output formats.
pub const EXPIRATION_KEYWORDS: &[&str] = &[
    "expiry",
    "expiration",
    "expires",
    "registered through",
    "expired",
    "expire",
    "domain_datebilleduntil",
    "paid-till",
    "renewal date",
    "fecha de vencimiento",
];

/// Finds the registration expiration date in a whois response body.
///
/// Keyword matching is case-insensitive, but the date is parsed from the
/// original line so month names and zone designators keep their case.
/// Matches may start mid-word.
///
/// # Returns
///
/// The first date found, or `None` if no keyword line contains one.
pub fn find_expiration_date(body: &str) -> Option<DateTime<Utc>> {
    for line in body.lines() {
        let lower = line.to_lowercase();
        if !EXPIRATION_KEYWORDS
            .iter()
            .any(|keyword| lower.contains(keyword))
        {
            continue;
        }

        for (offset, _) in line.char_indices() {
            if let Some(date) = parse_date_string(&line[offset..]) {
                log::debug!("Expiration date {date} found in whois line {line:?}");
                return Some(date);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_find_expiration_registry_expiry_line() {
        let body = "Domain Name: EXAMPLE.COM\nRegistry Expiry Date: 2025-01-01\n";
        assert_eq!(find_expiration_date(body), Some(day(2025, 1, 1)));
    }

    #[test]
    fn test_find_expiration_verisign_format() {
        let body = "\
   Domain Name: EXAMPLE.COM\r
   Registry Domain ID: 2336799_DOMAIN_COM-VRSN\r
   Updated Date: 2024-08-14T07:01:34Z\r
   Creation Date: 1995-08-14T04:00:00Z\r
   Registry Expiry Date: 2025-08-13T04:00:00Z\r
   Registrar: RESERVED-Internet Assigned Numbers Authority\r
";
        assert_eq!(
            find_expiration_date(body),
            Some(Utc.with_ymd_and_hms(2025, 8, 13, 4, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_find_expiration_is_case_insensitive() {
        let body = "EXPIRATION DATE: 2030-06-15";
        assert_eq!(find_expiration_date(body), Some(day(2030, 6, 15)));
    }

    #[test]
    fn test_find_expiration_ignores_dates_on_other_lines() {
        let body = "Creation Date: 1999-01-01\nUpdated Date: 2020-01-01\nExpires: 2031-03-04\n";
        assert_eq!(find_expiration_date(body), Some(day(2031, 3, 4)));
    }

    #[test]
    fn test_find_expiration_first_parseable_line_wins() {
        let body = "\
Registrar Registration Expiration Date:
Registry Expiry Date: 2026-02-02
Expiration Date: 2027-03-03
";
        assert_eq!(find_expiration_date(body), Some(day(2026, 2, 2)));
    }

    #[test]
    fn test_find_expiration_russian_paid_till() {
        let body = "domain:        EXAMPLE.RU\npaid-till:     2025-11-30T21:00:00Z\n";
        assert_eq!(
            find_expiration_date(body),
            Some(Utc.with_ymd_and_hms(2025, 11, 30, 21, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_find_expiration_spanish_keyword() {
        let body = "Fecha de Vencimiento: 15/01/2026";
        assert_eq!(find_expiration_date(body), Some(day(2026, 1, 15)));
    }

    #[test]
    fn test_find_expiration_registered_through() {
        let body = "Registered through: 10-Dec-2028";
        assert_eq!(find_expiration_date(body), Some(day(2028, 12, 10)));
    }

    #[test]
    fn test_find_expiration_dotted_german_style() {
        let body = "Expire Date: 01.02.2027";
        assert_eq!(find_expiration_date(body), Some(day(2027, 2, 1)));
    }

    #[test]
    fn test_find_expiration_matches_mid_word() {
        // The date directly follows the keyword with no separator
        let body = "expires2029-09-09";
        assert_eq!(find_expiration_date(body), Some(day(2029, 9, 9)));
    }

    #[test]
    fn test_find_expiration_multibyte_line() {
        let body = "Expiración — fecha de vencimiento: 2027-05-05";
        assert_eq!(find_expiration_date(body), Some(day(2027, 5, 5)));
    }

    #[test]
    fn test_find_expiration_none_without_keyword() {
        let body = "Domain Name: EXAMPLE.COM\nCreation Date: 1995-08-14\n";
        assert_eq!(find_expiration_date(body), None);
    }

    #[test]
    fn test_find_expiration_none_without_date() {
        let body = "Registry Expiry Date: unknown\nNOTICE: The expiration date displayed is informational.\n";
        assert_eq!(find_expiration_date(body), None);
    }

    #[test]
    fn test_find_expiration_empty_body() {
        assert_eq!(find_expiration_date(""), None);
    }

    #[test]
    fn test_find_expiration_with_zone_abbreviations() {
        let at = |h| Utc.with_ymd_and_hms(2025, 8, 13, h, 0, 0).unwrap();
        assert_eq!(
            find_expiration_date("Expiration date: 2025-08-13 11:04:05 CLST\n"),
            Some(Utc.with_ymd_and_hms(2025, 8, 13, 11, 4, 5).unwrap())
        );
        assert_eq!(
            find_expiration_date("Domain Expiration Date: Wed Aug 13 04:00:00 GMT 2025\n"),
            Some(at(4))
        );
        assert_eq!(
            find_expiration_date("Expiry Date: 2025-08-13 04:00:00 PST\n"),
            Some(at(4))
        );
    }
}
