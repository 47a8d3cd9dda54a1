//! Per-request log line
//!
//! One line per request with method, path and status. Any non-2xx answer logs
//! at WARN, with the error detail that [`ApiError`](super::ApiError) left in
//! the response extensions when there is one (router 404s carry none).

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

use super::response::FailureNote;

/// Request logging middleware, outermost layer of the router
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    let status = response.status();

    match response.extensions().get::<FailureNote>() {
        Some(note) => warn!(
            %method,
            %path,
            status = status.as_u16(),
            error = %note.0,
            "Request failed"
        ),
        None if !status.is_success() => {
            warn!(%method, %path, status = status.as_u16(), "Request failed")
        }
        None => info!(%method, %path, status = status.as_u16(), "Request served"),
    }

    response
}
