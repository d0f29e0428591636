//! Configuration constants.
//!
//! This module defines the timeouts, limits and defaults used throughout the
//! application. Runtime-tunable values are exposed again through [`Config`](super::Config).

use std::time::Duration;

/// Port every certificate probe connects to.
pub const HTTPS_PORT: u16 = 443;

/// Default number of certificate probes and registry queries in flight per request.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

// Network operation timeouts
/// TCP connection timeout in seconds for certificate probes
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 3;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;
/// Deadline for a whole registry (whois) query in seconds.
/// Covers referral lookups and the registry query itself.
pub const WHOIS_TIMEOUT_SECS: u64 = 10;
/// Overall deadline for one HTTP request in seconds.
/// In-flight lookups are cancelled once it elapses.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default lookahead window used to compute the "soon" cutoff.
pub const DEFAULT_LOOKAHEAD: Duration = Duration::from_secs(30 * 24 * 60 * 60);
/// Same as [`DEFAULT_LOOKAHEAD`], in the syntax accepted by `--default-ttl`.
pub const DEFAULT_LOOKAHEAD_STR: &str = "30d";

// HTTP server
/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0";
/// Default listen port (overridden by `PORT`)
pub const DEFAULT_PORT: u16 = 8080;
/// Product name used in calendar UIDs and the help page
pub const PRODUCT_NAME: &str = "expire.sh";

/// Maximum error message length in characters when rendered into a response line
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 500;
