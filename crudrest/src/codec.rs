//! Structural codec: turns request bodies into typed entities and into generic
//! key/value documents.
//!
//! The merge engine needs both views of the same payload. The typed decode
//! carries the converted values, the loose decode tells which top-level keys
//! the caller actually sent.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

/// Payload that could not be decoded (malformed syntax or a type mismatch)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed payload: {}", self.message)
    }
}

impl std::error::Error for DecodeError {}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Converts wire payloads into typed and generic in-memory representations.
pub trait StructuralCodec: Send + Sync + 'static {
    /// Decode `bytes` into `T`, failing on malformed input or mismatched types.
    ///
    /// # Errors
    ///
    /// Returns a `DecodeError` when the payload does not fit the shape of `T`.
    fn decode_strict<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError>;

    /// Decode `bytes` into a generic top-level field map.
    ///
    /// The key set is exactly the set of top-level keys present in the payload,
    /// whatever their values are.
    ///
    /// # Errors
    ///
    /// Returns a `DecodeError` when the payload is malformed or not an object.
    fn decode_loose(&self, bytes: &[u8]) -> Result<Map<String, Value>, DecodeError>;
}

/// JSON codec backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl StructuralCodec for JsonCodec {
    fn decode_strict<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn decode_loose(&self, bytes: &[u8]) -> Result<Map<String, Value>, DecodeError> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(map) => Ok(map),
            other => Err(DecodeError::new(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
