use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Logs method, URI, status, response size and duration once the handler
/// (and every inner layer) is done.
///
/// The body is buffered to measure it, so the size is what goes on the wire.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;
    let (parts, body) = response.into_parts();

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(method = %method, uri = %uri, error = %e, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = parts.status.as_u16(),
        size = bytes.len(),
        duration_ms = duration.as_millis() as u64,
        "request completed"
    );

    Response::from_parts(parts, Body::from(bytes))
}
