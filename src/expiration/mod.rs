//! Expiration aggregation.
//!
//! This module combines the certificate prober and the registration
//! extractor into one batch operation:
//! - every hostname gets exactly one certificate probe
//! - every distinct apex domain gets exactly one registry lookup, whose record
//!   is shared by all hostnames under it
//! - reports come back in input order regardless of completion order
//!
//! All lookups of a batch run concurrently, bounded by a semaphore.

mod classify;
mod types;

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::domain::{group_by_apex, ApexGroups};
use crate::error_handling::LookupError;
use crate::initialization::{init_extractor, init_semaphore};
use crate::tls::{CertificateProber, RustlsDialer};
use crate::whois::{RegistrationExtractor, WhoisServiceRegistry};

pub use classify::{classify, cutoff_for, evaluate_report, BatchStatus, Classification, Health};
pub use types::{CertificateRecord, ExpirationReport, RegistrationRecord};

/// One unit of work in a batch.
enum Job<'a> {
    Certificate { index: usize, hostname: &'a str },
    Registration { group: usize, apex: &'a str },
}

/// Result of one [`Job`], addressed by the slot it fills.
enum Outcome {
    Certificate(usize, CertificateRecord),
    Registration(usize, RegistrationRecord),
}

/// Computes certificate and registration expirations for batches of hostnames.
///
/// Holds only immutable, process-wide resources; every call to
/// [`compute_expirations`](Self::compute_expirations) is independent.
#[derive(Clone)]
pub struct ExpirationChecker {
    prober: CertificateProber,
    extractor: RegistrationExtractor,
    suffixes: Arc<psl::List>,
    max_concurrency: usize,
}

impl ExpirationChecker {
    /// Creates a checker from its two lookup components.
    pub fn new(prober: CertificateProber, extractor: RegistrationExtractor) -> Self {
        Self {
            prober,
            extractor,
            suffixes: init_extractor(),
            max_concurrency: crate::config::DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Builds a checker that talks to the network: rustls for certificates and
    /// `whois-service` for registrations, with timeouts and the worker limit
    /// taken from `config`.
    pub fn from_config(config: &Config) -> Self {
        let prober = CertificateProber::new(Arc::new(RustlsDialer::new())).with_timeouts(
            Duration::from_secs(config.connect_timeout_secs),
            Duration::from_secs(config.handshake_timeout_secs),
        );
        let whois_timeout = Duration::from_secs(config.whois_timeout_secs);
        let extractor =
            RegistrationExtractor::new(Arc::new(WhoisServiceRegistry::new()), whois_timeout);

        Self::new(prober, extractor).with_max_concurrency(config.max_concurrency)
    }

    /// Limits the number of lookups in flight per batch (minimum 1).
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Looks up every hostname and returns one report per input, in order.
    ///
    /// Never fails as a whole: each lookup failure is stored in the record it
    /// belongs to. Hostnames without a registrable domain still get a
    /// certificate probe; their registration record is left unset and the
    /// resolution failure is kept in the report's `apex`. Cancelling `cancel` makes all pending lookups finish promptly
    /// with a cancellation error.
    pub async fn compute_expirations(
        &self,
        hostnames: &[String],
        cancel: &CancellationToken,
    ) -> Vec<ExpirationReport> {
        let ApexGroups { per_host, groups } = group_by_apex(&self.suffixes, hostnames);
        log::debug!(
            "Checking {} hostname(s) across {} apex domain(s)",
            hostnames.len(),
            groups.len()
        );

        let semaphore = init_semaphore(self.max_concurrency);

        // Slots start out cancelled and are overwritten as jobs finish
        let mut certificates: Vec<CertificateRecord> = hostnames
            .iter()
            .map(|hostname| cancelled_certificate(hostname))
            .collect();
        let mut registrations: Vec<RegistrationRecord> = groups
            .iter()
            .map(|g| {
                RegistrationRecord::failed(LookupError::Cancelled {
                    target: g.apex.clone(),
                })
            })
            .collect();

        let jobs = hostnames
            .iter()
            .enumerate()
            .map(|(index, hostname)| Job::Certificate {
                index,
                hostname: hostname.as_str(),
            })
            .chain(groups.iter().enumerate().map(|(group, g)| Job::Registration {
                group,
                apex: g.apex.as_str(),
            }));

        let mut tasks: FuturesUnordered<_> = jobs
            .map(|job| self.run_job(job, &semaphore, cancel))
            .collect();

        while let Some(outcome) = tasks.next().await {
            match outcome {
                Outcome::Certificate(index, record) => certificates[index] = record,
                Outcome::Registration(group, record) => registrations[group] = record,
            }
        }
        drop(tasks);

        hostnames
            .iter()
            .zip(per_host)
            .zip(certificates)
            .map(|((hostname, group), certificate)| {
                let (apex, registration) = match group {
                    Ok(group) => (
                        Ok(groups[group].apex.clone()),
                        registrations[group].clone(),
                    ),
                    Err(e) => (Err(e), RegistrationRecord::default()),
                };
                ExpirationReport {
                    hostname: hostname.clone(),
                    apex,
                    certificate,
                    registration,
                }
            })
            .collect()
    }

    async fn run_job(&self, job: Job<'_>, semaphore: &Semaphore, cancel: &CancellationToken) -> Outcome {
        // The semaphore is never closed
        let _permit = semaphore.acquire().await.ok();
        match job {
            Job::Certificate { index, hostname } => {
                Outcome::Certificate(index, self.prober.probe(hostname, cancel).await)
            }
            Job::Registration { group, apex } => {
                Outcome::Registration(group, self.extractor.extract(apex, cancel).await)
            }
        }
    }
}

fn cancelled_certificate(hostname: &str) -> CertificateRecord {
    CertificateRecord::failed(LookupError::Cancelled {
        target: hostname.to_string(),
    })
}
