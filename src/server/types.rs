//! Shared server state.

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::expiration::ExpirationChecker;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Lookup engine
    pub checker: Arc<ExpirationChecker>,
    /// Lookahead used when a request has no `ttl` parameter
    pub default_ttl: Duration,
    /// Deadline after which pending lookups of a request are cancelled
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates the state from a checker and the server configuration.
    pub fn new(checker: ExpirationChecker, config: &Config) -> Self {
        Self {
            checker: Arc::new(checker),
            default_ttl: config.default_ttl,
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}
