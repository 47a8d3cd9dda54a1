//! Liveness check
//!
//! No authentication. GET always answers `{"ok":"true","result":null}`.

use axum::{http::Method, routing::any, Router};

use super::auth::require_get;
use super::response::{success, ApiResult};
use crate::AppState;

/// GET /status
pub async fn status(method: Method) -> ApiResult<()> {
    require_get(&method)?;
    Ok(success(()))
}

/// Build liveness routes
///
/// Routed with `any` so other methods reach the handler and get the 405
/// envelope instead of the router's empty 405.
pub fn status_routes() -> Router<AppState> {
    Router::new().route("/status", any(status))
}
