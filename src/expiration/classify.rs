//! Threshold classification of expiration reports.
//!
//! A report is healthy when neither record failed and neither date falls
//! strictly before the cutoff. A missing date counts as before the cutoff, so
//! a hostname without a registrable domain is imminent rather than failed.
//! The batch status is the worst of its reports, with errors outranking
//! imminent expirations.

use chrono::{DateTime, Duration, Utc};
use strum_macros::Display;

use super::ExpirationReport;

/// Health of a single report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Health {
    /// No errors and nothing expires before the cutoff
    #[strum(serialize = "healthy")]
    Healthy,
    /// An error, or an expiration before the cutoff
    #[strum(serialize = "not healthy")]
    NotHealthy,
}

/// Status of a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BatchStatus {
    /// Every report is healthy
    Healthy,
    /// No errors, but at least one date falls before the cutoff
    Imminent,
    /// At least one record failed
    Error,
}

/// Per-report health plus the batch status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Health of each report, in report order
    pub reports: Vec<Health>,
    /// Worst status across the batch
    pub batch: BatchStatus,
}

impl Classification {
    /// Health of report `index`.
    pub fn is_healthy(&self, index: usize) -> bool {
        self.reports.get(index) == Some(&Health::Healthy)
    }
}

/// Computes the cutoff for a lookahead window.
///
/// Dates strictly before the returned instant are considered imminent.
pub fn cutoff_for(now: DateTime<Utc>, lookahead: Duration) -> DateTime<Utc> {
    now.checked_sub_signed(lookahead)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn is_before(date: Option<DateTime<Utc>>, cutoff: DateTime<Utc>) -> bool {
    date.map_or(true, |d| d < cutoff)
}

/// Classifies one report against `cutoff`.
pub fn evaluate_report(report: &ExpirationReport, cutoff: DateTime<Utc>) -> Health {
    if report.has_error()
        || is_before(report.certificate.not_after, cutoff)
        || is_before(report.registration.expires, cutoff)
    {
        Health::NotHealthy
    } else {
        Health::Healthy
    }
}

/// Classifies every report and the batch as a whole.
pub fn classify(reports: &[ExpirationReport], cutoff: DateTime<Utc>) -> Classification {
    let mut any_error = false;
    let mut any_imminent = false;

    let health = reports
        .iter()
        .map(|report| {
            any_error |= report.has_error();
            any_imminent |= is_before(report.certificate.not_after, cutoff)
                || is_before(report.registration.expires, cutoff);
            evaluate_report(report, cutoff)
        })
        .collect();

    let batch = if any_error {
        BatchStatus::Error
    } else if any_imminent {
        BatchStatus::Imminent
    } else {
        BatchStatus::Healthy
    };

    Classification {
        reports: health,
        batch,
    }
}
