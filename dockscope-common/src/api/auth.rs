//! API authentication via a single shared secret
//!
//! # Architecture
//!
//! - One random secret is generated when the process starts
//! - Callers pass it as the `key` query parameter on every protected request
//! - The secret is never persisted, rotated or exposed through the API
//!
//! Comparison hashes both sides with SHA-256 and compares the digests in
//! fixed time, so response timing depends on neither the content nor the
//! length of the supplied key.
//!
//! # Pure Functions
//!
//! No HTTP framework dependencies here; the middleware lives in the service crate.

use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::{Error, Result};

/// Length of the generated secret in characters
pub const SECRET_LEN: usize = 32;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

// ========================================
// Error Types
// ========================================

/// Key validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuthError {
    /// No `key` parameter, or an empty one
    KeyNotFound,

    /// `key` does not match the shared secret
    KeyInvalid,
}

impl std::fmt::Display for ApiAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuthError::KeyNotFound => write!(f, "API key not found"),
            ApiAuthError::KeyInvalid => write!(f, "API key invalid"),
        }
    }
}

impl std::error::Error for ApiAuthError {}

// ========================================
// Shared Secret
// ========================================

/// Process-wide API secret
///
/// Built once at startup and shared read-only (behind an `Arc`) with every
/// handler. `Debug` output is redacted; use [`SharedSecret::expose`] to get
/// the value for the one-time operator printout.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(String);

impl SharedSecret {
    /// Generate a fresh secret from the OS random source
    ///
    /// Fails if the OS random source cannot be read. Callers must treat this
    /// as fatal; there is no fallback secret.
    pub fn generate() -> Result<Self> {
        let mut out = String::with_capacity(SECRET_LEN);
        let mut buf = [0u8; SECRET_LEN];

        // Rejection sampling keeps the alphabet distribution uniform
        let limit = 256 - (256 % ALPHABET.len());
        while out.len() < SECRET_LEN {
            OsRng
                .try_fill_bytes(&mut buf)
                .map_err(|e| Error::Random(e.to_string()))?;

            for byte in buf {
                if (byte as usize) < limit && out.len() < SECRET_LEN {
                    out.push(ALPHABET[byte as usize % ALPHABET.len()] as char);
                }
            }
        }

        Ok(Self(out))
    }

    /// Wrap a known value (tests and fixtures)
    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Secret value, for printing once at startup
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Fixed-time equality against caller input
    pub fn matches(&self, provided: &str) -> bool {
        let expected = Sha256::digest(self.0.as_bytes());
        let provided = Sha256::digest(provided.as_bytes());
        expected.as_slice().ct_eq(provided.as_slice()).into()
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

// ========================================
// Key Validation
// ========================================

/// Extract the first `key` value from a raw query string
///
/// Values are percent-decoded. Later occurrences of `key` are ignored.
///
/// # Examples
///
/// ```
/// use dockscope_common::api::auth::key_from_query;
///
/// assert_eq!(key_from_query(Some("key=abc&key=def")).as_deref(), Some("abc"));
/// assert_eq!(key_from_query(Some("other=1")), None);
/// assert_eq!(key_from_query(None), None);
/// ```
pub fn key_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == "key")
        .map(|(_, value)| value.into_owned())
}

/// Validate a caller-supplied key against the shared secret
///
/// Absent and empty keys are both reported as [`ApiAuthError::KeyNotFound`].
///
/// # Examples
///
/// ```
/// use dockscope_common::api::auth::{validate_key, ApiAuthError, SharedSecret};
///
/// let secret = SharedSecret::from_value("s3cr3t");
/// assert!(validate_key(Some("s3cr3t"), &secret).is_ok());
/// assert_eq!(validate_key(None, &secret), Err(ApiAuthError::KeyNotFound));
/// assert_eq!(validate_key(Some("nope"), &secret), Err(ApiAuthError::KeyInvalid));
/// ```
pub fn validate_key(provided: Option<&str>, secret: &SharedSecret) -> std::result::Result<(), ApiAuthError> {
    let provided = match provided {
        Some(key) if !key.is_empty() => key,
        _ => return Err(ApiAuthError::KeyNotFound),
    };

    if !secret.matches(provided) {
        return Err(ApiAuthError::KeyInvalid);
    }

    Ok(())
}

// ========================================
// Tests
// ========================================
