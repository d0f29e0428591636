//! Registry queries through the `whois-service` crate.
//!
//! `whois-service` chooses the server to ask for each domain. Only its raw
//! answer is used here: the expiration date is extracted by
//! [`find_expiration_date`](super::find_expiration_date), not by the crate's
//! own parser.

use async_trait::async_trait;
use whois_service::WhoisClient;

use super::RegistryQuery;
use crate::error_handling::LookupError;

/// [`RegistryQuery`] backed by `whois_service::WhoisClient`.
///
/// A client is created per query, so nothing is cached across requests.
/// Deadlines and cancellation are applied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhoisServiceRegistry;

impl WhoisServiceRegistry {
    /// Creates the registry adapter.
    pub fn new() -> Self {
        Self
    }
}

fn query_error(domain: &str, message: impl std::fmt::Display) -> LookupError {
    LookupError::Query {
        domain: domain.to_string(),
        message: message.to_string(),
    }
}

#[async_trait]
impl RegistryQuery for WhoisServiceRegistry {
    async fn query(&self, domain: &str) -> Result<String, LookupError> {
        let client = WhoisClient::new()
            .await
            .map_err(|e| query_error(domain, format!("cannot create whois client: {e}")))?;

        let response = client
            .lookup(domain)
            .await
            .map_err(|e| query_error(domain, e))?;

        log::debug!(
            "whois answer for {domain}: {} byte(s)",
            response.raw_data.len()
        );
        Ok(response.raw_data)
    }
}
