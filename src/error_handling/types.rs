//! Error type definitions.
//!
//! This module defines the failures that can be attached to a certificate or
//! registration record, their coarse categories, and initialization errors.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error binding the HTTP listener.
    #[error("Failed to bind {addr}: {source}")]
    ListenerError {
        /// Address the server tried to bind
        addr: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// A failure on one axis (certificate or registration) of one hostname.
///
/// Lookup failures are data, not control flow: they are stored in the record
/// they belong to and never abort the rest of the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// TCP connection could not be established (refused, unreachable, DNS failure).
    #[error("dial tcp {host}:{port}: {message}")]
    Connect {
        /// Host that was dialed
        host: String,
        /// Port that was dialed
        port: u16,
        /// Underlying error text
        message: String,
    },

    /// A network operation did not finish within its deadline.
    #[error("{operation} for {target} timed out after {secs}s")]
    Timeout {
        /// What was being done (e.g. "TCP connect", "TLS handshake", "whois query")
        operation: &'static str,
        /// Host or domain involved
        target: String,
        /// Deadline in seconds
        secs: u64,
    },

    /// TLS handshake failed (including an unusable server name).
    #[error("TLS handshake with {host} failed: {message}")]
    Handshake {
        /// Host that was contacted
        host: String,
        /// Underlying error text
        message: String,
    },

    /// The server completed the handshake without presenting any certificate.
    #[error("{host} presented an empty certificate chain")]
    EmptyChain {
        /// Host that was contacted
        host: String,
    },

    /// A certificate in the presented chain could not be decoded.
    #[error("cannot decode certificate {index} presented by {host}: {message}")]
    Certificate {
        /// Host that was contacted
        host: String,
        /// Position in the presented chain (0 = leaf)
        index: usize,
        /// Decoder error text
        message: String,
    },

    /// The registry (whois) query failed at the transport level.
    #[error("whois query for {domain} failed: {message}")]
    Query {
        /// Domain that was queried
        domain: String,
        /// Underlying error text
        message: String,
    },

    /// The registry answered but no expiration date could be found in the text.
    #[error("cannot determine expiration date from whois record for {domain}")]
    Extraction {
        /// Domain that was queried
        domain: String,
    },

    /// No registrable domain could be derived from the hostname.
    #[error("no registrable domain for {host:?}: {reason}")]
    Resolution {
        /// Hostname as given by the caller
        host: String,
        /// Why resolution failed
        reason: String,
    },

    /// The request was cancelled (client went away or request deadline hit).
    #[error("lookup for {target} cancelled")]
    Cancelled {
        /// Host or domain involved
        target: String,
    },
}

/// Coarse failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Dial, handshake, query, timeout or cancellation failure
    Network,
    /// The peer behaved in an unexpected way (empty or undecodable chain)
    ProtocolAnomaly,
    /// Registry text had no recognizable expiration date
    Extraction,
    /// No apex domain could be derived from the hostname
    Resolution,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Network => "network error",
            FailureKind::ProtocolAnomaly => "protocol anomaly",
            FailureKind::Extraction => "extraction failure",
            FailureKind::Resolution => "resolution failure",
        }
    }
}

impl LookupError {
    /// Category of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            LookupError::Connect { .. }
            | LookupError::Timeout { .. }
            | LookupError::Handshake { .. }
            | LookupError::Query { .. }
            | LookupError::Cancelled { .. } => FailureKind::Network,
            LookupError::EmptyChain { .. } | LookupError::Certificate { .. } => {
                FailureKind::ProtocolAnomaly
            }
            LookupError::Extraction { .. } => FailureKind::Extraction,
            LookupError::Resolution { .. } => FailureKind::Resolution,
        }
    }
}
