//! Expirations handler.
//!
//! Serves every path except `/`: the path is a comma-separated hostname list,
//! optionally behind a format prefix.

use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::super::format::{render, OutputFormat};
use super::super::types::AppState;
use crate::expiration::{classify, cutoff_for, BatchStatus};
use crate::utils::parse_ttl;

/// Query parameters understood by the expirations endpoint.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ExpirationParams {
    /// Raw `ttl` value, if present and non-empty
    pub ttl: Option<String>,
    /// Whether `quiet` was given (with or without a value)
    pub quiet: bool,
}

impl ExpirationParams {
    pub(crate) fn parse(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "ttl" if params.ttl.is_none() && !value.is_empty() => {
                    params.ttl = Some(value.into_owned());
                }
                "quiet" => params.quiet = true,
                _ => {}
            }
        }
        params
    }
}

/// Splits `/a.example,b.example/` into hostnames.
///
/// Hostnames are passed on exactly as written; only the surrounding slashes
/// of the path are removed.
pub(crate) fn split_hostnames(path: &str) -> Vec<String> {
    path.trim_matches('/')
        .split(',')
        .map(str::to_string)
        .collect()
}

/// Cancels `cancel` after `timeout`, unless it is cancelled first.
fn spawn_deadline(cancel: CancellationToken, timeout: Duration) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                log::warn!("Request deadline of {}s reached, cancelling pending lookups", timeout.as_secs());
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
    });
}

/// Looks up the hostnames in the path and renders the result.
pub async fn expirations_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let (forced, path) = OutputFormat::from_path_prefix(uri.path());
    let format = forced.unwrap_or_else(|| {
        OutputFormat::negotiate(headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()))
    });

    let params = ExpirationParams::parse(uri.query());
    let ttl = match params.ttl.as_deref() {
        Some(raw) => match parse_ttl(raw) {
            Ok(ttl) => ttl,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("Cannot parse ttl parameter: {e}\n"),
                )
                    .into_response();
            }
        },
        None => state.default_ttl,
    };

    let hostnames = split_hostnames(path);

    // Cancelled when this handler finishes or is dropped (client went away)
    let cancel = CancellationToken::new();
    let _cancel_on_drop = cancel.clone().drop_guard();
    spawn_deadline(cancel.clone(), state.request_timeout);

    let started = Instant::now();
    let reports = state.checker.compute_expirations(&hostnames, &cancel).await;

    let now = Utc::now();
    let lookahead = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
    let classification = classify(&reports, cutoff_for(now, lookahead));

    log::info!(
        "Checked {} hostname(s) in {} ms: {}",
        hostnames.len(),
        started.elapsed().as_millis(),
        classification.batch
    );

    let visible: Vec<_> = if params.quiet {
        reports
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !classification.is_healthy(*i))
            .map(|(_, report)| report)
            .collect()
    } else {
        reports
    };

    // Calendar clients treat non-2xx as a broken feed
    let status = match (format, classification.batch) {
        (OutputFormat::Calendar, _) => StatusCode::OK,
        (_, BatchStatus::Error) => StatusCode::BAD_GATEWAY,
        (_, BatchStatus::Imminent) => StatusCode::EXPECTATION_FAILED,
        (_, BatchStatus::Healthy) => StatusCode::OK,
    };

    let mut response = (status, render(format, &visible, now)).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    if format == OutputFormat::Calendar {
        response_headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_static("inline; filename=\"calendar.ics\""),
        );
    }
    response
}
