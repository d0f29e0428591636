//! Tab-separated plain text encoding.

use crate::expiration::ExpirationReport;
use crate::utils::sanitize_field;

use super::display_time;

/// Renders one line per report: hostname, certificate expiry or error, apex,
/// registration expiry or error.
pub fn render_text(reports: &[ExpirationReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let certificate = match (&report.certificate.error, report.certificate.not_after) {
            (Some(e), _) => sanitize_field(&e.to_string()),
            (None, Some(t)) => display_time(t),
            (None, None) => String::new(),
        };
        let registration = match (&report.registration.error, report.registration.expires) {
            (Some(e), _) => sanitize_field(&e.to_string()),
            (None, Some(t)) => display_time(t),
            (None, None) => String::new(),
        };

        let fields = [
            sanitize_field(&report.hostname),
            certificate,
            report.apex_name().unwrap_or_default().to_string(),
            registration,
        ];
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }
    out
}
