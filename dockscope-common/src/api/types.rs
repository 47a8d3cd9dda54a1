//! Shared API response types
//!
//! Every dockscope response body is an [`Envelope`]:
//!
//! ```text
//! {"ok":"true","result":<payload>}
//! {"ok":"false","result":"API_KEY_INVALID"}
//! ```
//!
//! `ok` travels as the string `"true"`/`"false"` rather than a JSON boolean;
//! existing clients compare against the string.

use serde::{Deserialize, Serialize};

// ========================================
// Error Codes
// ========================================

/// Error tokens placed in `result` of a failed envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request used a method other than GET
    MethodNotAllowed,

    /// `key` query parameter absent or empty
    ApiKeyNotFound,

    /// `key` did not match the shared secret
    ApiKeyInvalid,

    /// Container runtime query failed
    RuntimeError,
}

impl ErrorCode {
    /// Wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorCode::ApiKeyNotFound => "API_KEY_NOT_FOUND",
            ErrorCode::ApiKeyInvalid => "API_KEY_INVALID",
            ErrorCode::RuntimeError => "RUNTIME_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Envelope
// ========================================

/// Uniform `{ok, result}` response wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(with = "ok_flag")]
    pub ok: bool,
    pub result: T,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `payload` verbatim
    pub fn success(payload: T) -> Self {
        Self {
            ok: true,
            result: payload,
        }
    }
}

impl Envelope<ErrorCode> {
    /// Failed envelope carrying the error token
    pub fn failure(code: ErrorCode) -> Self {
        Self {
            ok: false,
            result: code,
        }
    }
}

/// `ok` as `"true"`/`"false"` on the wire; decoding also takes a JSON boolean
mod ok_flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ok: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *ok { "true" } else { "false" })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Text(String),
        Bool(bool),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => Ok(b),
            Flag::Text(s) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(de::Error::invalid_value(
                    de::Unexpected::Str(other),
                    &"\"true\" or \"false\"",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_wire_format() {
        let envelope = Envelope::success(json!([{"id": "abc123", "name": "web"}]));
        let body = serde_json::to_string(&envelope).unwrap();

        assert_eq!(body, r#"{"ok":"true","result":[{"id":"abc123","name":"web"}]}"#);
    }

    #[test]
    fn test_unit_payload_is_null() {
        let body = serde_json::to_string(&Envelope::success(())).unwrap();

        assert_eq!(body, r#"{"ok":"true","result":null}"#);
    }

    #[test]
    fn test_failure_wire_format() {
        let cases = [
            (ErrorCode::MethodNotAllowed, "METHOD_NOT_ALLOWED"),
            (ErrorCode::ApiKeyNotFound, "API_KEY_NOT_FOUND"),
            (ErrorCode::ApiKeyInvalid, "API_KEY_INVALID"),
            (ErrorCode::RuntimeError, "RUNTIME_ERROR"),
        ];

        for (code, token) in cases {
            let body = serde_json::to_string(&Envelope::failure(code)).unwrap();
            assert_eq!(body, format!(r#"{{"ok":"false","result":"{}"}}"#, token));
            assert_eq!(code.as_str(), token);
        }
    }

    #[test]
    fn test_ok_flag_accepts_string_and_bool() {
        let from_string: Envelope<Option<i32>> =
            serde_json::from_str(r#"{"ok":"true","result":null}"#).unwrap();
        let from_bool: Envelope<Option<i32>> =
            serde_json::from_str(r#"{"ok":false,"result":null}"#).unwrap();

        assert!(from_string.ok);
        assert!(!from_bool.ok);
    }

    #[test]
    fn test_ok_flag_rejects_other_strings() {
        let parsed: Result<Envelope<Option<i32>>, _> =
            serde_json::from_str(r#"{"ok":"yes","result":null}"#);

        assert!(parsed.is_err());
    }
}
