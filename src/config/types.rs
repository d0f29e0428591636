//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_LOOKAHEAD, DEFAULT_LOOKAHEAD_STR, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_PORT, REQUEST_TIMEOUT_SECS, TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS,
    WHOIS_TIMEOUT_SECS,
};
use crate::utils::parse_ttl;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line by the binary, but can also be constructed
/// programmatically through [`Default`].
///
/// # Examples
///
/// ```no_run
/// use domain_expiry::Config;
///
/// let config = Config {
///     port: 9000,
///     max_concurrency: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_expiry",
    version,
    about = "Reports how soon TLS certificates and domain registrations expire"
)]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Maximum certificate probes and registry queries in flight per request
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// TCP connect timeout for certificate probes, in seconds
    #[arg(long, default_value_t = TCP_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,

    /// TLS handshake timeout for certificate probes, in seconds
    #[arg(long, default_value_t = TLS_HANDSHAKE_TIMEOUT_SECS)]
    pub handshake_timeout_secs: u64,

    /// Deadline for each registry (whois) lookup, in seconds
    #[arg(long, default_value_t = WHOIS_TIMEOUT_SECS)]
    pub whois_timeout_secs: u64,

    /// Overall deadline for one request, in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Lookahead window used when a request has no `ttl` parameter (e.g. 30d, 720h, 1y)
    #[arg(long, default_value = DEFAULT_LOOKAHEAD_STR, value_parser = parse_ttl)]
    pub default_ttl: Duration,
}

impl Config {
    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            connect_timeout_secs: TCP_CONNECT_TIMEOUT_SECS,
            handshake_timeout_secs: TLS_HANDSHAKE_TIMEOUT_SECS,
            whois_timeout_secs: WHOIS_TIMEOUT_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            default_ttl: DEFAULT_LOOKAHEAD,
        }
    }
}
