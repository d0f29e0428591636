//! Main application entry point (server binary).
//!
//! This is a thin wrapper around the `domain_expiry` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger and TLS initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_expiry::initialization::{init_crypto_provider, init_logger_with};
use domain_expiry::{server, Config, ExpirationChecker};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    // Must run before the first TLS dial
    init_crypto_provider();

    log::info!(
        "Starting domain_expiry (max concurrency {}, default ttl {:?})",
        config.max_concurrency,
        config.default_ttl
    );

    let checker = ExpirationChecker::from_config(&config);
    if let Err(e) = server::serve(&config, checker).await {
        eprintln!("domain_expiry error: {e:#}");
        process::exit(1);
    }

    Ok(())
}
