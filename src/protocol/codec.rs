//! Protocol codec
//!
//! Encoding of commands and decoding of responses.
//!
//! ## Wire Format
//!
//! One JSON value per message, with no length prefix and no delimiter.
//!
//! ### Request
//! ```text
//! {"type":"Scan","cf":"default","start_key":[107,49],"end_key":[107,52],"limit":10}
//! ```
//!
//! ### Response
//! ```text
//! {"Value":[118,49]}            Get hit
//! {"Value":null}                Get miss
//! {"Values":[[[107,49],[118,49]]]}
//! {"Info":{"total_keys":3,"column_families":["default"]}}
//! {"error":"boom"}              also accepted as "Error"
//! "Ok"                          bare acknowledgement
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::bytes::{encode_base64, json_type};
use super::{Command, CommandType, Response};
use crate::error::{KvError, Result};

/// How the Scan `end_key` is put on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndKeyEncoding {
    /// Raw bytes of the end key as an array, like every other key field
    #[default]
    Raw,

    /// The end key is base64-encoded first and the bytes of that string are
    /// sent as the array. Matches older clients.
    Base64Wrapped,
}

#[derive(Serialize)]
struct WireCommand<'a> {
    #[serde(rename = "type")]
    kind: CommandType,
    #[serde(skip_serializing_if = "Option::is_none")]
    cf: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a [u8]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a [u8]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_key: Option<&'a [u8]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_key: Option<Cow<'a, [u8]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

impl<'a> WireCommand<'a> {
    fn new(kind: CommandType) -> Self {
        Self {
            kind,
            cf: None,
            key: None,
            value: None,
            start_key: None,
            end_key: None,
            limit: None,
        }
    }
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(rename = "Value", default)]
    value: Option<Value>,
    #[serde(rename = "Values", default)]
    values: Option<Value>,
    #[serde(rename = "Info", default)]
    info: Option<Value>,
}

/// Keys the server may use for its error message
const ERROR_KEYS: [&str; 2] = ["error", "Error"];

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command into a single JSON payload
///
/// Only the fields meaningful for the command kind are written.
pub fn encode_command(command: &Command, end_key_encoding: EndKeyEncoding) -> Result<Vec<u8>> {
    let mut wire = WireCommand::new(command.command_type());

    match command {
        Command::Put { cf, key, value } => {
            wire.cf = cf.as_deref();
            wire.key = Some(key.as_slice());
            wire.value = Some(value.as_slice());
        }
        Command::Get { cf, key } | Command::Delete { cf, key } => {
            wire.cf = cf.as_deref();
            wire.key = Some(key.as_slice());
        }
        Command::Scan {
            cf,
            start_key,
            end_key,
            limit,
        } => {
            wire.cf = cf.as_deref();
            wire.start_key = start_key.as_deref();
            wire.end_key = end_key.as_deref().map(|k| match end_key_encoding {
                EndKeyEncoding::Raw => Cow::Borrowed(k),
                EndKeyEncoding::Base64Wrapped => Cow::Owned(encode_base64(k).into_bytes()),
            });
            wire.limit = *limit;
        }
        Command::Info | Command::Flush | Command::Compact => {}
    }

    serde_json::to_vec(&wire).map_err(|e| KvError::Serialization(e.to_string()))
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode one response payload
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let payload: Value = serde_json::from_slice(bytes)
        .map_err(|e| KvError::decode(format!("malformed response: {}", e)))?;

    let map = match payload {
        Value::String(s) if s == "Ok" => return Ok(Response::Ack),
        Value::Object(map) => map,
        other => {
            return Err(KvError::decode(format!(
                "unexpected response of type {}",
                json_type(&other)
            )))
        }
    };

    if let Some(message) = server_error(&map)? {
        return Ok(Response::Error(message));
    }

    let wire: WireResponse = serde_json::from_value(Value::Object(map))
        .map_err(|e| KvError::decode(format!("invalid response: {}", e)))?;

    match wire.info {
        Some(Value::Object(info)) => return Ok(Response::Info(info)),
        Some(other) => {
            return Err(KvError::decode(format!(
                "Info must be an object, got {}",
                json_type(&other)
            )))
        }
        None => {}
    }
    if let Some(values) = wire.values {
        return Ok(Response::Values(values));
    }
    if let Some(value) = wire.value {
        return Ok(Response::Value(value));
    }
    Ok(Response::Ack)
}

/// The first non-empty error message, checked before any other field
fn server_error(map: &Map<String, Value>) -> Result<Option<String>> {
    for key in ERROR_KEYS {
        match map.get(key) {
            Some(Value::String(message)) if !message.is_empty() => {
                return Ok(Some(message.clone()))
            }
            Some(Value::String(_)) | Some(Value::Null) | None => {}
            Some(other) => {
                return Err(KvError::decode(format!(
                    "{} must be a string, got {}",
                    key,
                    json_type(other)
                )))
            }
        }
    }
    Ok(None)
}
