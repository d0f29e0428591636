//! iCalendar (RFC 5545) encoding.
//!
//! Each report becomes two all-day events: one for the certificate and one
//! for the domain registration. Failed lookups are placed on the day of the
//! request so they show up in the calendar immediately.

use chrono::{DateTime, Days, Utc};

use crate::config::PRODUCT_NAME;
use crate::error_handling::LookupError;
use crate::expiration::ExpirationReport;
use crate::utils::sanitize_field;

use super::display_time;

/// Content lines longer than this many octets are folded.
const MAX_LINE_OCTETS: usize = 75;

struct Event {
    uid: String,
    day: DateTime<Utc>,
    summary: String,
    description: String,
}

fn certificate_event(report: &ExpirationReport, now: DateTime<Utc>) -> Event {
    let name = &report.hostname;
    let uid = format!("{name}@certificates.{PRODUCT_NAME}");
    match (report.certificate.not_after, &report.certificate.error) {
        (Some(not_after), None) => Event {
            uid,
            day: not_after,
            summary: format!("{name} certificate expires on {}", display_time(not_after)),
            description: format!("{name} certificate expires"),
        },
        (_, error) => Event {
            uid,
            day: now,
            summary: format!(
                "checking certificate for {name}: {}",
                error_text(error.as_ref())
            ),
            description: format!("{name}: error checking certificate"),
        },
    }
}

fn domain_event(report: &ExpirationReport, now: DateTime<Utc>) -> Event {
    let name = &report.hostname;
    let uid = format!("{name}@domain.{PRODUCT_NAME}");
    match (report.registration.expires, &report.registration.error) {
        (Some(expires), None) => Event {
            uid,
            day: expires,
            summary: format!(
                "The domain registration for {name} ({}) expires on {}",
                report.apex_name().unwrap_or(""),
                display_time(expires)
            ),
            description: format!("{name} domain expires"),
        },
        (_, error) => Event {
            uid,
            day: now,
            summary: format!(
                "checking domain expiration for {name}: {}",
                // An unset record points back at the apex resolution failure
                error_text(error.as_ref().or(report.apex.as_ref().err()))
            ),
            description: format!("{name}: error checking domain expiration"),
        },
    }
}

fn error_text(error: Option<&LookupError>) -> String {
    error
        .map(|e| sanitize_field(&e.to_string()))
        .unwrap_or_else(|| "no result".to_string())
}

/// Escapes TEXT property values.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Appends a CRLF-terminated content line, folding it at 75 octets.
fn push_line(out: &mut String, line: &str) {
    let mut octets = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if octets + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            // The leading space of a continuation line counts
            octets = 1;
        }
        out.push(c);
        octets += len;
    }
    out.push_str("\r\n");
}

fn push_event(out: &mut String, event: &Event, stamp: &str) {
    let start = event.day.date_naive();
    // DTEND is exclusive for all-day events
    let end = start.checked_add_days(Days::new(1)).unwrap_or(start);

    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}", escape_text(&event.uid)));
    push_line(out, &format!("DTSTAMP:{stamp}"));
    push_line(out, &format!("DTSTART;VALUE=DATE:{}", start.format("%Y%m%d")));
    push_line(out, &format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
    push_line(out, &format!("SUMMARY:{}", escape_text(&event.summary)));
    push_line(out, &format!("DESCRIPTION:{}", escape_text(&event.description)));
    push_line(out, "END:VEVENT");
}

/// Renders a `VCALENDAR` with a certificate and a domain event per report.
pub fn render_calendar(reports: &[ExpirationReport], now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y%m%dT%H%M%SZ").to_string();
    let mut out = String::new();

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:-//{PRODUCT_NAME}//domain_expiry//EN"));
    push_line(&mut out, "CALSCALE:GREGORIAN");
    for report in reports {
        push_event(&mut out, &certificate_event(report, now), &stamp);
        push_event(&mut out, &domain_event(report, now), &stamp);
    }
    push_line(&mut out, "END:VCALENDAR");

    out
}
