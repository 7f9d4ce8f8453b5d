//! Middleware for logging requests and responses.

use std::time::Instant;

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Response bodies longer than this many characters are truncated at the
/// `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// The request line is logged at the `info` level, as is the response status
/// and body. If the response body is longer than [LOG_BODY_LENGTH_LIMIT]
/// characters, it is truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::info!("Received request: {method} {uri}");

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed();

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            return Error::Internal(format!("could not read response body: {error}"))
                .into_response();
        }
    };

    log_response(
        &method,
        &uri,
        parts.status,
        &String::from_utf8_lossy(&body_bytes),
    );
    tracing::debug!("Handled {method} {uri} in {elapsed:?}");

    Response::from_parts(parts, Body::from(body_bytes))
}

/// Get the first `limit` characters of `text`, or `None` if `text` is not
/// longer than that.
fn truncate(text: &str, limit: usize) -> Option<&str> {
    text.char_indices()
        .nth(limit)
        .map(|(byte_index, _)| &text[..byte_index])
}

fn log_response(method: &Method, uri: &Uri, status: StatusCode, body: &str) {
    match truncate(body, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!("Sending response to {method} {uri}: {status}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response to {method} {uri}: {status}\nbody: {body}"),
    }
}
