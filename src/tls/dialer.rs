//! Live TLS dialer backed by `tokio-rustls`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use super::extract::certificate_not_after;
use super::{PeerCertificate, TlsDialer};
use crate::error_handling::LookupError;

/// Dials hosts with rustls, verifying against the webpki root store.
///
/// The client configuration is built once and shared by every dial.
#[derive(Clone)]
pub struct RustlsDialer {
    connector: TlsConnector,
}

impl Default for RustlsDialer {
    fn default() -> Self {
        Self::new()
    }
}

impl RustlsDialer {
    /// Builds a dialer trusting the bundled Mozilla roots.
    pub fn new() -> Self {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Self {
            connector: TlsConnector::from(Arc::new(config)),
        }
    }
}

#[async_trait]
impl TlsDialer for RustlsDialer {
    async fn dial(
        &self,
        hostname: &str,
        port: u16,
        connect_timeout: Duration,
        handshake_timeout: Duration,
    ) -> Result<Vec<PeerCertificate>, LookupError> {
        let server_name = ServerName::try_from(hostname.to_string()).map_err(|e| {
            LookupError::Handshake {
                host: hostname.to_string(),
                message: format!("invalid server name: {e}"),
            }
        })?;

        log::debug!("Connecting to {hostname}:{port}");
        let sock = match tokio::time::timeout(connect_timeout, TcpStream::connect((hostname, port)))
            .await
        {
            Ok(Ok(sock)) => sock,
            Ok(Err(e)) => {
                return Err(LookupError::Connect {
                    host: hostname.to_string(),
                    port,
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(LookupError::Timeout {
                    operation: "TCP connect",
                    target: format!("{hostname}:{port}"),
                    secs: connect_timeout.as_secs(),
                });
            }
        };

        let tls_stream = match tokio::time::timeout(
            handshake_timeout,
            self.connector.connect(server_name, sock),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(LookupError::Handshake {
                    host: hostname.to_string(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(LookupError::Timeout {
                    operation: "TLS handshake",
                    target: hostname.to_string(),
                    secs: handshake_timeout.as_secs(),
                });
            }
        };

        let chain = tls_stream.get_ref().1.peer_certificates().unwrap_or(&[]);
        log::debug!("{hostname} presented {} certificate(s)", chain.len());

        chain
            .iter()
            .enumerate()
            .map(|(index, der)| {
                certificate_not_after(der.as_ref())
                    .map(|not_after| PeerCertificate { not_after })
                    .map_err(|message| LookupError::Certificate {
                        host: hostname.to_string(),
                        index,
                        message,
                    })
            })
            .collect()
    }
}
