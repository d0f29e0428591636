//! Response encodings and content negotiation.
//!
//! Three encodings are offered: plain text (the default), JSON and
//! iCalendar. The format is forced by a `/text/`, `/json/` or `/ical/` path
//! prefix, or negotiated from the `Accept` header otherwise.

mod ical;
mod json;
mod text;

use chrono::{DateTime, Utc};

use crate::expiration::ExpirationReport;

pub use ical::render_calendar;
pub use json::render_json;
pub use text::render_text;

/// Encoding of an expirations response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-separated lines
    Text,
    /// `{"expirations":[...]}`
    Json,
    /// iCalendar feed
    Calendar,
}

/// Offered media types, in preference order for ties.
const OFFERS: [(OutputFormat, &str); 3] = [
    (OutputFormat::Json, "application/json"),
    (OutputFormat::Text, "text/plain"),
    (OutputFormat::Calendar, "text/calendar"),
];

impl OutputFormat {
    /// Media type sent in `Content-Type`.
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain; charset=utf-8",
            OutputFormat::Json => "application/json",
            OutputFormat::Calendar => "text/calendar; charset=utf-8",
        }
    }

    /// Splits a format prefix off a request path.
    ///
    /// `/json/a.com,b.com` becomes `(Some(Json), "/a.com,b.com")`; paths without
    /// a known prefix are returned unchanged.
    pub fn from_path_prefix(path: &str) -> (Option<OutputFormat>, &str) {
        for (prefix, format) in [
            ("/ical/", OutputFormat::Calendar),
            ("/json/", OutputFormat::Json),
            ("/text/", OutputFormat::Text),
        ] {
            if path.starts_with(prefix) {
                return (Some(format), &path[prefix.len() - 1..]);
            }
        }
        (None, path)
    }

    /// Picks the best offered format for an `Accept` header.
    ///
    /// The offer with the highest quality wins; at equal quality a more
    /// specific match beats a wildcard. Missing or unmatched headers fall back
    /// to plain text.
    pub fn negotiate(accept: Option<&str>) -> OutputFormat {
        let Some(accept) = accept.filter(|a| !a.trim().is_empty()) else {
            return OutputFormat::Text;
        };

        let ranges: Vec<(&str, f32)> = accept.split(',').filter_map(parse_media_range).collect();

        let mut best: Option<(OutputFormat, f32, u8)> = None;
        for (format, offer) in OFFERS {
            let Some((q, specificity)) = match_offer(&ranges, offer) else {
                continue;
            };
            if q <= 0.0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, best_q, best_spec)) => q > best_q || (q == best_q && specificity > best_spec),
            };
            if better {
                best = Some((format, q, specificity));
            }
        }

        best.map(|(format, _, _)| format).unwrap_or(OutputFormat::Text)
    }
}

/// Parses `type/subtype;q=0.5` into the media range and its quality.
fn parse_media_range(item: &str) -> Option<(&str, f32)> {
    let mut parts = item.split(';');
    let range = parts.next()?.trim();
    if range.is_empty() {
        return None;
    }

    let mut q = 1.0;
    for param in parts {
        if let Some((name, value)) = param.split_once('=') {
            if name.trim().eq_ignore_ascii_case("q") {
                q = value.trim().parse().unwrap_or(0.0);
            }
        }
    }
    Some((range, q))
}

/// Quality and specificity (2 exact, 1 `type/*`, 0 `*/*`) of the most
/// specific range matching `offer`.
fn match_offer(ranges: &[(&str, f32)], offer: &str) -> Option<(f32, u8)> {
    let offer_type = offer.split('/').next().unwrap_or(offer);
    ranges
        .iter()
        .filter_map(|&(range, q)| {
            if range.eq_ignore_ascii_case(offer) {
                Some((q, 2))
            } else if range.eq_ignore_ascii_case(&format!("{offer_type}/*")) {
                Some((q, 1))
            } else if range == "*/*" {
                Some((q, 0))
            } else {
                None
            }
        })
        .max_by_key(|&(_, specificity)| specificity)
}

/// Timestamp as shown in text and calendar summaries.
pub(crate) fn display_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Renders reports in the requested format.
pub fn render(format: OutputFormat, reports: &[ExpirationReport], now: DateTime<Utc>) -> String {
    match format {
        OutputFormat::Text => render_text(reports),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Calendar => render_calendar(reports, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_prefix() {
        assert_eq!(
            OutputFormat::from_path_prefix("/json/a.com,b.com"),
            (Some(OutputFormat::Json), "/a.com,b.com")
        );
        assert_eq!(
            OutputFormat::from_path_prefix("/ical/a.com"),
            (Some(OutputFormat::Calendar), "/a.com")
        );
        assert_eq!(
            OutputFormat::from_path_prefix("/text/a.com"),
            (Some(OutputFormat::Text), "/a.com")
        );
        assert_eq!(OutputFormat::from_path_prefix("/a.com"), (None, "/a.com"));
        // A bare prefix without trailing slash is a hostname
        assert_eq!(OutputFormat::from_path_prefix("/json"), (None, "/json"));
    }

    #[test]
    fn test_negotiate_defaults_to_text() {
        assert_eq!(OutputFormat::negotiate(None), OutputFormat::Text);
        assert_eq!(OutputFormat::negotiate(Some("")), OutputFormat::Text);
        assert_eq!(OutputFormat::negotiate(Some("image/png")), OutputFormat::Text);
    }

    #[test]
    fn test_negotiate_exact_types() {
        assert_eq!(
            OutputFormat::negotiate(Some("application/json")),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::negotiate(Some("text/calendar")),
            OutputFormat::Calendar
        );
        assert_eq!(OutputFormat::negotiate(Some("text/plain")), OutputFormat::Text);
    }

    #[test]
    fn test_negotiate_quality_values() {
        assert_eq!(
            OutputFormat::negotiate(Some("application/json;q=0.5, text/calendar")),
            OutputFormat::Calendar
        );
        assert_eq!(
            OutputFormat::negotiate(Some("text/plain;q=0, application/json;q=0.1")),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_negotiate_wildcards() {
        // Browsers send */* last; the first offer wins among equal wildcards
        assert_eq!(OutputFormat::negotiate(Some("*/*")), OutputFormat::Json);
        assert_eq!(
            OutputFormat::negotiate(Some("text/html, */*;q=0.8")),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::negotiate(Some("text/*, application/json;q=0.9")),
            OutputFormat::Text
        );
    }
}
