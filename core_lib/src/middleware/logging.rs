//! Request logging middleware configuration

use crate::config::LoggingConfig;
use axum::{body::Body, Router};
use http::Request;
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::info_span;

/// Adds a `TraceLayer` to `router` unless request logging is disabled.
pub fn with_request_logging<S>(router: Router<S>, config: &LoggingConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if !config.enable_request_logging {
        return router;
    }

    let log_headers = config.log_headers;

    let layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                query = ?request.uri().query(),
                version = ?request.version(),
            )
        })
        .on_request(move |request: &Request<Body>, _span: &tracing::Span| {
            if log_headers {
                tracing::info!(
                    headers = ?request.headers(),
                    "started processing request {} {}",
                    request.method(),
                    request.uri().path()
                );
            } else {
                tracing::info!(
                    "started processing request {} {}",
                    request.method(),
                    request.uri().path()
                );
            }
        })
        .on_response(|response: &http::Response<Body>, latency: Duration, _span: &tracing::Span| {
            let status = response.status();
            let latency_ms = latency.as_millis();

            if status.is_server_error() {
                tracing::error!(
                    status = status.as_u16(),
                    latency_ms = latency_ms,
                    "server error response"
                );
            } else if status.is_client_error() {
                tracing::warn!(
                    status = status.as_u16(),
                    latency_ms = latency_ms,
                    "client error response"
                );
            } else {
                tracing::info!(
                    status = status.as_u16(),
                    latency_ms = latency_ms,
                    "request completed"
                );
            }
        })
        .on_failure(
            |error: ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span| {
                tracing::error!(
                    latency_ms = latency.as_millis(),
                    error = ?error,
                    "request failed"
                );
            },
        );

    router.layer(layer)
}
