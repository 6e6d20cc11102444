//! Response definitions
//!
//! A response payload is resolved once into [`Response`], then mapped into
//! the return shape of the operation that sent the request.

use serde_json::{Map, Value};

use super::bytes::{decode_value, json_type};
use super::CommandType;
use crate::error::{KvError, Result};

/// A parsed server response
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Acknowledgement without payload (`"Ok"` or an empty object)
    Ack,

    /// A single value in either byte encoding
    Value(Value),

    /// Scan results, expected to be `[[key, value], ...]`
    Values(Value),

    /// Server statistics
    Info(Map<String, Value>),

    /// Non-empty `error` field. Takes precedence over every other field.
    Error(String),
}

/// One key/value pair from a scan, presented as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanItem {
    pub key: String,
    pub value: String,
}

impl ScanItem {
    fn from_bytes(key: &[u8], value: &[u8]) -> Self {
        Self {
            key: String::from_utf8_lossy(key).into_owned(),
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

impl From<ScanItem> for (String, String) {
    fn from(item: ScanItem) -> Self {
        (item.key, item.value)
    }
}

/// Result of an Info command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    pub total_keys: u64,
    pub column_families: Vec<String>,
}

impl Response {
    /// The server-reported error, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Error(message) => Some(message),
            _ => None,
        }
    }

    fn fail<T>(message: String, op: CommandType) -> Result<T> {
        Err(KvError::Operation { op, message })
    }

    /// Map a Put/Delete/Flush/Compact response
    pub fn into_ack(self, op: CommandType) -> Result<()> {
        match self {
            Response::Error(message) => Self::fail(message, op),
            _ => Ok(()),
        }
    }

    /// Map a Get response. `None` means the key was not found.
    pub fn into_get(self) -> Result<Option<Vec<u8>>> {
        match self {
            Response::Error(message) => Self::fail(message, CommandType::Get),
            Response::Value(Value::Null) => Ok(None),
            Response::Value(Value::Array(items)) if items.is_empty() => Ok(None),
            Response::Value(value) => decode_value(&value).map(Some),
            _ => Ok(None),
        }
    }

    /// Map a Scan response
    ///
    /// Items that are not two decodable byte sequences are skipped; the rest
    /// keep their response order.
    pub fn into_scan(self) -> Result<Vec<ScanItem>> {
        let items = match self {
            Response::Error(message) => return Self::fail(message, CommandType::Scan),
            Response::Values(Value::Array(items)) => items,
            Response::Values(Value::Null) => return Ok(Vec::new()),
            Response::Values(other) => {
                return Err(KvError::decode(format!(
                    "scan response Values must be an array, got {}",
                    json_type(&other)
                )))
            }
            _ => return Ok(Vec::new()),
        };

        let mut result = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match decode_pair(item) {
                Ok(pair) => result.push(pair),
                Err(e) => tracing::debug!("Skipping scan item {}: {}", index, e),
            }
        }
        Ok(result)
    }

    /// Map an Info response
    pub fn into_info(self) -> Result<ServerInfo> {
        let info = match self {
            Response::Error(message) => return Self::fail(message, CommandType::Info),
            Response::Info(info) => info,
            _ => return Err(KvError::decode("missing Info in response")),
        };

        let total_keys = info.get("total_keys").map(total_keys).unwrap_or(0);
        let column_families = info
            .get("column_families")
            .and_then(Value::as_array)
            .map(|cfs| {
                cfs.iter()
                    .filter_map(|cf| cf.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();

        Ok(ServerInfo {
            total_keys,
            column_families,
        })
    }
}

fn decode_pair(item: &Value) -> Result<ScanItem> {
    let pair = item.as_array().ok_or_else(|| {
        KvError::decode(format!("scan item must be an array, got {}", json_type(item)))
    })?;
    if pair.len() != 2 {
        return Err(KvError::decode(format!(
            "scan item has {} elements, expected 2",
            pair.len()
        )));
    }
    let key = decode_value(&pair[0])?;
    let value = decode_value(&pair[1])?;
    Ok(ScanItem::from_bytes(&key, &value))
}

// Float counts are truncated; negatives and NaN saturate to 0.
fn total_keys(value: &Value) -> u64 {
    value
        .as_u64()
        .or_else(|| value.as_f64().map(|n| n as u64))
        .unwrap_or(0)
}
