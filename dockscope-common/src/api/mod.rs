//! API module for shared HTTP API functionality
//!
//! Provides the shared secret, API key validation and the response envelope
//! used by every dockscope endpoint.
//!
//! # Design Principle
//!
//! This module contains ONLY:
//! - Pure functions (no HTTP framework dependencies)
//! - Shared wire types
//!
//! The service crate wraps these with Axum middleware and responses.

pub mod auth;
pub mod types;

pub use auth::{key_from_query, validate_key, ApiAuthError, SharedSecret, SECRET_LEN};
pub use types::{Envelope, ErrorCode};
