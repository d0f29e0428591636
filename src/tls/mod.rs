//! TLS certificate expiration probing.
//!
//! This module connects to `hostname:443`, completes a handshake with SNI set
//! to the hostname and reports the earliest not-after timestamp across the
//! whole presented chain, intermediates included.
//!
//! Uses `tokio-rustls` for async TLS connections and `x509-parser` for
//! certificate parsing (see [`RustlsDialer`]).

mod dialer;
mod extract;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::config::{HTTPS_PORT, TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::LookupError;
use crate::expiration::CertificateRecord;

pub use dialer::RustlsDialer;

/// One decoded certificate from a peer chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerCertificate {
    /// End of the validity period
    pub not_after: DateTime<Utc>,
}

/// Opens a TLS session and returns the peer's certificate chain.
#[async_trait]
pub trait TlsDialer: Send + Sync {
    /// Connects to `hostname:port` and completes a handshake with SNI set to
    /// `hostname`.
    ///
    /// Returns the chain in the order presented (leaf first). An empty vector
    /// means the peer sent no certificates.
    async fn dial(
        &self,
        hostname: &str,
        port: u16,
        connect_timeout: Duration,
        handshake_timeout: Duration,
    ) -> Result<Vec<PeerCertificate>, LookupError>;
}

/// Returns the earliest not-after in a chain, or `None` for an empty chain.
pub fn earliest_not_after(chain: &[PeerCertificate]) -> Option<DateTime<Utc>> {
    chain.iter().map(|cert| cert.not_after).min()
}

/// Probes hostnames for their certificate expiration.
#[derive(Clone)]
pub struct CertificateProber {
    dialer: Arc<dyn TlsDialer>,
    connect_timeout: Duration,
    handshake_timeout: Duration,
}

impl CertificateProber {
    /// Creates a prober with the default connect and handshake timeouts.
    pub fn new(dialer: Arc<dyn TlsDialer>) -> Self {
        Self {
            dialer,
            connect_timeout: Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
            handshake_timeout: Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        }
    }

    /// Overrides the connect and handshake timeouts.
    pub fn with_timeouts(mut self, connect: Duration, handshake: Duration) -> Self {
        self.connect_timeout = connect;
        self.handshake_timeout = handshake;
        self
    }

    /// Dials `hostname` on port 443 and returns its certificate record.
    ///
    /// Never fails: every failure, including an empty chain and cancellation,
    /// is stored in the record's `error`. No retries.
    pub async fn probe(&self, hostname: &str, cancel: &CancellationToken) -> CertificateRecord {
        let dial = self.dialer.dial(
            hostname,
            HTTPS_PORT,
            self.connect_timeout,
            self.handshake_timeout,
        );

        let chain = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return CertificateRecord::failed(LookupError::Cancelled {
                    target: hostname.to_string(),
                });
            }
            result = dial => match result {
                Ok(chain) => chain,
                Err(e) => {
                    log::warn!("Certificate probe for {hostname} failed: {e}");
                    return CertificateRecord::failed(e);
                }
            },
        };

        match earliest_not_after(&chain) {
            Some(not_after) => {
                log::debug!("Certificate chain for {hostname} expires {not_after}");
                CertificateRecord::ok(not_after)
            }
            None => {
                log::warn!("{hostname} completed the handshake without a certificate");
                CertificateRecord::failed(LookupError::EmptyChain {
                    host: hostname.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FailureKind;
    use chrono::TimeZone;

    struct StaticDialer(Result<Vec<PeerCertificate>, LookupError>);

    #[async_trait]
    impl TlsDialer for StaticDialer {
        async fn dial(
            &self,
            _hostname: &str,
            _port: u16,
            _connect_timeout: Duration,
            _handshake_timeout: Duration,
        ) -> Result<Vec<PeerCertificate>, LookupError> {
            self.0.clone()
        }
    }

    fn cert(y: i32, m: u32, d: u32) -> PeerCertificate {
        PeerCertificate {
            not_after: Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
        }
    }

    fn prober(result: Result<Vec<PeerCertificate>, LookupError>) -> CertificateProber {
        CertificateProber::new(Arc::new(StaticDialer(result)))
    }

    #[test]
    fn test_earliest_not_after_picks_minimum() {
        let chain = [cert(2030, 1, 1), cert(2026, 6, 1), cert(2035, 1, 1)];
        assert_eq!(
            earliest_not_after(&chain),
            Some(Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_earliest_not_after_empty_chain() {
        assert_eq!(earliest_not_after(&[]), None);
    }

    #[tokio::test]
    async fn test_probe_uses_weakest_link() {
        // Intermediate expires before the leaf
        let p = prober(Ok(vec![cert(2027, 1, 1), cert(2026, 3, 1)]));
        let record = p.probe("example.com", &CancellationToken::new()).await;
        assert_eq!(record.not_after, Some(cert(2026, 3, 1).not_after));
        assert!(record.error.is_none());
    }

    #[tokio::test]
    async fn test_probe_empty_chain_is_an_error() {
        let p = prober(Ok(vec![]));
        let record = p.probe("example.com", &CancellationToken::new()).await;
        assert!(record.not_after.is_none());
        let err = record.error.unwrap();
        assert_eq!(err.kind(), FailureKind::ProtocolAnomaly);
    }

    #[tokio::test]
    async fn test_probe_keeps_dial_error() {
        let err = LookupError::Handshake {
            host: "badcert.example".into(),
            message: "invalid peer certificate: Expired".into(),
        };
        let p = prober(Err(err.clone()));
        let record = p.probe("badcert.example", &CancellationToken::new()).await;
        assert!(record.not_after.is_none());
        assert_eq!(record.error, Some(err));
    }

    #[tokio::test]
    async fn test_probe_cancelled() {
        let p = prober(Ok(vec![cert(2030, 1, 1)]));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let record = p.probe("example.com", &cancel).await;
        assert!(matches!(record.error, Some(LookupError::Cancelled { .. })));
    }
}
