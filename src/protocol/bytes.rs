//! Byte codec
//!
//! A byte sequence (key or value) appears on the wire in one of two shapes:
//!
//! ```text
//! [107, 49]      JSON array of integers in 0..=255, one per byte
//! "azE="         standard base64 string
//! ```
//!
//! The client always sends the array form. Responses may use either, so the
//! shape is inspected once and resolved into a [`WireBytes`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use crate::error::{KvError, Result};

/// A byte sequence as found in a response, classified by its JSON shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireBytes<'a> {
    /// `[98, 111, 98]`
    Array(&'a [Value]),

    /// `"Ym9i"`
    Base64(&'a str),
}

impl<'a> WireBytes<'a> {
    /// Classify a JSON value. Only arrays and strings carry bytes.
    pub fn classify(value: &'a Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(WireBytes::Array(items)),
            Value::String(text) => Ok(WireBytes::Base64(text)),
            other => Err(KvError::decode(format!(
                "unsupported data type: {}",
                json_type(other)
            ))),
        }
    }

    /// Decode into raw bytes
    pub fn decode(self) -> Result<Vec<u8>> {
        match self {
            WireBytes::Array(items) => items
                .iter()
                .map(|item| byte_from_json(item).ok_or_else(|| KvError::decode("invalid byte value")))
                .collect(),
            WireBytes::Base64(text) => STANDARD
                .decode(text)
                .map_err(|e| KvError::decode(format!("invalid base64: {}", e))),
        }
    }
}

/// Decode a wire value (array or base64 string) into bytes
pub fn decode_value(value: &Value) -> Result<Vec<u8>> {
    WireBytes::classify(value)?.decode()
}

/// Encode bytes in the raw-byte-array form
pub fn encode_array(bytes: &[u8]) -> Value {
    Value::Array(bytes.iter().map(|&b| Value::from(b)).collect())
}

/// Encode bytes as a standard base64 string
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// One array element as a byte. Integral floats such as `98.0` are accepted.
fn byte_from_json(value: &Value) -> Option<u8> {
    if let Some(n) = value.as_u64() {
        return u8::try_from(n).ok();
    }
    let n = value.as_f64()?;
    if n.fract() == 0.0 && (0.0..=255.0).contains(&n) {
        Some(n as u8)
    } else {
        None
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
