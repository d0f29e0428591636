//! Per-hostname expiration records.

use chrono::{DateTime, Utc};

use crate::error_handling::LookupError;

/// Outcome of probing one hostname's certificate chain.
///
/// `not_after` is the earliest expiration across the whole presented chain.
/// Exactly one of the two fields is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    /// Earliest not-after across the chain
    pub not_after: Option<DateTime<Utc>>,
    /// Why the probe failed
    pub error: Option<LookupError>,
}

impl CertificateRecord {
    /// A successful probe.
    pub fn ok(not_after: DateTime<Utc>) -> Self {
        Self {
            not_after: Some(not_after),
            error: None,
        }
    }

    /// A failed probe.
    pub fn failed(error: LookupError) -> Self {
        Self {
            not_after: None,
            error: Some(error),
        }
    }
}

/// Outcome of one registry lookup, shared by every hostname under the apex.
///
/// Hostnames without an apex get an unset record: neither field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRecord {
    /// Registration expiration date
    pub expires: Option<DateTime<Utc>>,
    /// Why the lookup failed
    pub error: Option<LookupError>,
}

impl RegistrationRecord {
    /// A successful lookup.
    pub fn ok(expires: DateTime<Utc>) -> Self {
        Self {
            expires: Some(expires),
            error: None,
        }
    }

    /// A failed lookup.
    pub fn failed(error: LookupError) -> Self {
        Self {
            expires: None,
            error: Some(error),
        }
    }
}

/// Everything known about one input hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationReport {
    /// Hostname exactly as given
    pub hostname: String,
    /// Registrable domain, or why none could be derived
    pub apex: Result<String, LookupError>,
    /// Certificate chain expiration
    pub certificate: CertificateRecord,
    /// Domain registration expiration
    pub registration: RegistrationRecord,
}

impl ExpirationReport {
    /// Registrable domain, if one could be derived.
    pub fn apex_name(&self) -> Option<&str> {
        self.apex.as_deref().ok()
    }

    /// Returns `true` if either record carries an error.
    ///
    /// A missing apex is not an error; it leaves the registration unset.
    pub fn has_error(&self) -> bool {
        self.certificate.error.is_some() || self.registration.error.is_some()
    }
}
