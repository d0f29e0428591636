//! Registration expiration lookup.
//!
//! The registry is queried through `whois-service` and the expiration date
//! is located in the unstructured answer with a keyword heuristic (see
//! [`find_expiration_date`]).
//!
//! Key types:
//! - [`RegistryQuery`] - Fetches the raw registry text for a domain
//! - [`WhoisServiceRegistry`] - `whois-service` implementation of `RegistryQuery`
//! - [`RegistrationExtractor`] - Turns a domain into a `RegistrationRecord`

mod client;
mod extract;
mod parse;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error_handling::LookupError;
use crate::expiration::RegistrationRecord;

pub use client::WhoisServiceRegistry;
pub use extract::{find_expiration_date, EXPIRATION_KEYWORDS};

/// Source of raw registry text for a domain.
#[async_trait]
pub trait RegistryQuery: Send + Sync {
    /// Returns the full, unparsed registry response for `domain`.
    async fn query(&self, domain: &str) -> Result<String, LookupError>;
}

/// Looks up registration expiration dates for apex domains.
#[derive(Clone)]
pub struct RegistrationExtractor {
    registry: Arc<dyn RegistryQuery>,
    timeout: Duration,
}

impl RegistrationExtractor {
    /// Creates an extractor that bounds every registry query by `timeout`.
    pub fn new(registry: Arc<dyn RegistryQuery>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Queries the registry for `domain` and extracts its expiration date.
    ///
    /// Never fails: transport errors, timeouts, cancellation and unparseable
    /// answers are all reported through the record's `error`. The raw text of
    /// an unparseable answer is logged, not returned.
    pub async fn extract(&self, domain: &str, cancel: &CancellationToken) -> RegistrationRecord {
        log::debug!("Querying registry for {domain}");

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return RegistrationRecord::failed(LookupError::Cancelled {
                    target: domain.to_string(),
                });
            }
            result = tokio::time::timeout(self.timeout, self.registry.query(domain)) => {
                match result {
                    Ok(Ok(body)) => body,
                    Ok(Err(e)) => {
                        log::warn!("Registry query for {domain} failed: {e}");
                        return RegistrationRecord::failed(e);
                    }
                    Err(_) => {
                        log::warn!("Registry query for {domain} timed out");
                        return RegistrationRecord::failed(LookupError::Timeout {
                            operation: "whois query",
                            target: domain.to_string(),
                            secs: self.timeout.as_secs(),
                        });
                    }
                }
            }
        };

        match find_expiration_date(&body) {
            Some(expires) => RegistrationRecord::ok(expires),
            None => {
                log::warn!("cannot determine expiration date for {domain} from whois record {body:?}");
                RegistrationRecord::failed(LookupError::Extraction {
                    domain: domain.to_string(),
                })
            }
        }
    }
}
