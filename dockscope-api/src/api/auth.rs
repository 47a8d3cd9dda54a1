//! Authentication middleware for dockscope
//!
//! Checks, in order:
//! 1. Method is GET, else 405 `METHOD_NOT_ALLOWED`
//! 2. `key` query parameter present and non-empty, else 404 `API_KEY_NOT_FOUND`
//! 3. `key` equals the shared secret, else 404 `API_KEY_INVALID`
//!
//! The method check always runs first, so a POST with a valid key is still a 405.
//! On failure the middleware writes the response itself and the handler never
//! runs.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use dockscope_common::api::{key_from_query, validate_key, SharedSecret};

use super::response::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Applied to resource routes only. `/status` does not use it.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(request.method(), request.uri().query(), &state.shared_secret)?;

    Ok(next.run(request).await)
}

/// Method and key checks for one request
pub fn authorize(
    method: &Method,
    query: Option<&str>,
    secret: &SharedSecret,
) -> Result<(), ApiError> {
    require_get(method)?;

    let key = key_from_query(query);
    validate_key(key.as_deref(), secret)?;

    Ok(())
}

/// Only GET is served anywhere in this API
pub fn require_get(method: &Method) -> Result<(), ApiError> {
    if *method != Method::GET {
        return Err(ApiError::MethodNotAllowed);
    }
    Ok(())
}
