//! domain_expiry library: certificate and domain registration expiration checks
//!
//! For a list of hostnames this library determines when each TLS certificate
//! chain and each domain registration expires, and classifies the results
//! against a lookahead window. The HTTP service in [`server`] renders them as
//! text, JSON or iCalendar.
//!
//! # Example
//!
//! ```no_run
//! use domain_expiry::{classify, cutoff_for, Config, ExpirationChecker};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() {
//! domain_expiry::initialization::init_crypto_provider();
//! let checker = ExpirationChecker::from_config(&Config::default());
//!
//! let hostnames = vec!["www.example.com".to_string(), "example.org".to_string()];
//! let reports = checker
//!     .compute_expirations(&hostnames, &CancellationToken::new())
//!     .await;
//!
//! let cutoff = cutoff_for(chrono::Utc::now(), chrono::Duration::days(30));
//! let classification = classify(&reports, cutoff);
//! println!("batch status: {}", classification.batch);
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod domain;
pub mod error_handling;
pub mod expiration;
pub mod initialization;
pub mod server;
pub mod tls;
mod utils;
pub mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{FailureKind, LookupError};
pub use expiration::{
    classify, cutoff_for, evaluate_report, BatchStatus, CertificateRecord, Classification,
    ExpirationChecker, ExpirationReport, Health, RegistrationRecord,
};
pub use utils::parse_ttl;
