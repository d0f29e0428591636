//! JSON encoding.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::expiration::ExpirationReport;

#[derive(Serialize)]
struct ExpirationsBody<'a> {
    expirations: Vec<ExpirationEntry<'a>>,
}

/// One report in the wire shape existing clients parse.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExpirationEntry<'a> {
    name: &'a str,
    certificate_expires: Option<String>,
    certificate_error: Option<String>,
    domain: &'a str,
    domain_expires: Option<String>,
    domain_error: Option<String>,
}

fn rfc3339(time: Option<DateTime<Utc>>) -> Option<String> {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
}

impl<'a> From<&'a ExpirationReport> for ExpirationEntry<'a> {
    fn from(report: &'a ExpirationReport) -> Self {
        Self {
            name: &report.hostname,
            certificate_expires: rfc3339(report.certificate.not_after),
            certificate_error: report.certificate.error.as_ref().map(|e| e.to_string()),
            domain: report.apex_name().unwrap_or(""),
            domain_expires: rfc3339(report.registration.expires),
            domain_error: report.registration.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Renders `{"expirations":[...]}` followed by a newline.
pub fn render_json(reports: &[ExpirationReport]) -> String {
    let body = ExpirationsBody {
        expirations: reports.iter().map(ExpirationEntry::from).collect(),
    };
    // Serializing plain strings and options cannot fail
    let mut out = serde_json::to_string(&body).unwrap_or_else(|_| "{\"expirations\":[]}".into());
    out.push('\n');
    out
}
