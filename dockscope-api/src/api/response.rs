//! Response envelope writing
//!
//! Successful handlers return `Json(Envelope::success(payload))` with 200.
//! Every failure goes through [`ApiError`], which writes the failed envelope
//! with its status and leaves a [`FailureNote`] in the response extensions for
//! the request log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dockscope_common::api::{ApiAuthError, Envelope, ErrorCode};
use thiserror::Error;

/// Handler result: success envelope or API error
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// Wrap a collaborator payload in a success envelope, unchanged
pub fn success<T>(payload: T) -> Json<Envelope<T>> {
    Json(Envelope::success(payload))
}

/// Error detail attached to failed responses for logging
#[derive(Debug, Clone)]
pub struct FailureNote(pub String);

/// Terminal request failures
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("METHOD_NOT_ALLOWED")]
    MethodNotAllowed,

    #[error("API_KEY_NOT_FOUND")]
    KeyNotFound,

    #[error("API_KEY_INVALID")]
    KeyInvalid,

    /// Collaborator failed; the detail is logged, never sent
    #[error("RUNTIME_ERROR: {0}")]
    Runtime(#[from] dockscope_common::Error),
}

impl ApiError {
    /// Token placed in the envelope `result`
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::MethodNotAllowed => ErrorCode::MethodNotAllowed,
            ApiError::KeyNotFound => ErrorCode::ApiKeyNotFound,
            ApiError::KeyInvalid => ErrorCode::ApiKeyInvalid,
            ApiError::Runtime(_) => ErrorCode::RuntimeError,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::KeyNotFound | ApiError::KeyInvalid => StatusCode::NOT_FOUND,
            ApiError::Runtime(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<ApiAuthError> for ApiError {
    fn from(err: ApiAuthError) -> Self {
        match err {
            ApiAuthError::KeyNotFound => ApiError::KeyNotFound,
            ApiAuthError::KeyInvalid => ApiError::KeyInvalid,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), Json(Envelope::failure(self.code()))).into_response();
        response
            .extensions_mut()
            .insert(FailureNote(self.to_string()));
        response
    }
}
