// Shared test helpers: in-memory fakes for the TLS and registry seams.
//
// Each test file includes this module with `mod helpers;`, so not every
// helper is used by every file.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use domain_expiry::tls::{CertificateProber, PeerCertificate, TlsDialer};
use domain_expiry::whois::{RegistrationExtractor, RegistryQuery};
use domain_expiry::{ExpirationChecker, LookupError};

/// Dialer answering from a fixed table; unknown hosts are refused.
#[derive(Default)]
pub struct FakeDialer {
    chains: HashMap<String, Result<Vec<PeerCertificate>, LookupError>>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl FakeDialer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host presents a chain with these not-after dates.
    pub fn with_chain(mut self, host: &str, not_afters: &[DateTime<Utc>]) -> Self {
        let chain = not_afters
            .iter()
            .map(|&not_after| PeerCertificate { not_after })
            .collect();
        self.chains.insert(host.to_string(), Ok(chain));
        self
    }

    /// Host fails the handshake with `message`.
    pub fn with_handshake_failure(mut self, host: &str, message: &str) -> Self {
        self.chains.insert(
            host.to_string(),
            Err(LookupError::Handshake {
                host: host.to_string(),
                message: message.to_string(),
            }),
        );
        self
    }

    /// Every dial sleeps this long first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl TlsDialer for FakeDialer {
    async fn dial(
        &self,
        hostname: &str,
        port: u16,
        _connect_timeout: Duration,
        _handshake_timeout: Duration,
    ) -> Result<Vec<PeerCertificate>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.chains
            .get(hostname)
            .cloned()
            .unwrap_or_else(|| {
                Err(LookupError::Connect {
                    host: hostname.to_string(),
                    port,
                    message: "connection refused".to_string(),
                })
            })
    }
}

/// Registry answering from a fixed table and counting queries per domain.
#[derive(Default)]
pub struct FakeRegistry {
    bodies: HashMap<String, String>,
    delay: Option<Duration>,
    queries: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Domain answers with `body`.
    pub fn with_body(mut self, domain: &str, body: &str) -> Self {
        self.bodies.insert(domain.to_string(), body.to_string());
        self
    }

    /// Domain answers with a Verisign-style record expiring at `expires`.
    pub fn with_expiry(self, domain: &str, expires: DateTime<Utc>) -> Self {
        let body = format!(
            "   Domain Name: {}\r\n   Registry Expiry Date: {}\r\n",
            domain.to_uppercase(),
            expires.format("%Y-%m-%dT%H:%M:%SZ")
        );
        self.with_body(domain, &body)
    }

    /// Every query sleeps this long first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Domains queried so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryQuery for FakeRegistry {
    async fn query(&self, domain: &str) -> Result<String, LookupError> {
        self.queries.lock().unwrap().push(domain.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.bodies
            .get(domain)
            .cloned()
            .ok_or_else(|| LookupError::Query {
                domain: domain.to_string(),
                message: "no such domain".to_string(),
            })
    }
}

/// Builds a checker over the given fakes.
pub fn checker(dialer: Arc<FakeDialer>, registry: Arc<FakeRegistry>) -> ExpirationChecker {
    ExpirationChecker::new(
        CertificateProber::new(dialer),
        RegistrationExtractor::new(registry, Duration::from_secs(10)),
    )
}

/// Converts string literals into owned hostnames.
pub fn hosts(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
