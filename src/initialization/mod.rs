//! Process-wide resource setup.
//!
//! This module provides the one-time initializers used at startup and by
//! each batch:
//! - Logger
//! - rustls crypto provider
//! - Public Suffix List
//! - Per-batch worker semaphore

mod logger;

use std::sync::Arc;

use rustls::crypto::{ring::default_provider, CryptoProvider};
use tokio::sync::Semaphore;

pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// # Arguments
///
/// * `count` - Maximum number of concurrent lookups allowed
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

/// Initializes the Public Suffix List used to derive apex domains.
pub fn init_extractor() -> Arc<psl::List> {
    Arc::new(psl::List)
}

/// Installs `ring` as the process-wide rustls crypto provider.
///
/// Must run before the first TLS dial.
pub fn init_crypto_provider() {
    // Already installed is fine
    let _ = CryptoProvider::install_default(default_provider());
}
