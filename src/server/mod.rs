//! HTTP server.
//!
//! Provides two kinds of endpoints:
//! - `/` - Plain-text help page
//! - `/<host>,<host>,...` - Expirations for the listed hostnames, optionally
//!   prefixed with `/text/`, `/json/` or `/ical/`
//!
//! Query parameters: `ttl` (lookahead window, e.g. `60d`) and `quiet` (omit
//! healthy hosts).

pub mod format;
mod handlers;
mod types;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::expiration::ExpirationChecker;

use handlers::{expirations_handler, index_handler};
pub use types::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .fallback(expirations_handler)
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &Config, checker: ExpirationChecker) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| InitializationError::ListenerError {
            addr: addr.clone(),
            source,
        })?;

    let local = listener
        .local_addr()
        .context("Failed to read listener address")?;
    log::info!("Listening on http://{local}/");

    let app = router(AppState::new(checker, config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            log::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}
