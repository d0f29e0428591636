//! Error handling.
//!
//! This module provides:
//! - `LookupError`, the per-record failure value
//! - `FailureKind`, the coarse taxonomy every `LookupError` maps into
//! - `InitializationError` for startup failures
//!
//! Failure categories:
//! - **Network**: dial, handshake, whois transport, timeouts, cancellation
//! - **Protocol anomaly**: empty or undecodable certificate chain
//! - **Extraction**: registry text without a recognizable expiration date
//! - **Resolution**: no registrable domain for the hostname

mod types;

// Re-export public API
pub use types::{FailureKind, InitializationError, LookupError};
