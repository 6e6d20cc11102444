//! Command definitions
//!
//! Represents requests sent to the server.

use std::fmt;

use serde::Serialize;

/// Command types, serialized as the wire `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandType {
    Put,
    Get,
    Delete,
    Scan,
    Info,
    Flush,
    Compact,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Put => "Put",
            CommandType::Get => "Get",
            CommandType::Delete => "Delete",
            CommandType::Scan => "Scan",
            CommandType::Info => "Info",
            CommandType::Flush => "Flush",
            CommandType::Compact => "Compact",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to the server
///
/// Every optional field left as `None` is omitted from the wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a key-value pair
    Put {
        cf: Option<String>,
        key: Vec<u8>,
        value: Vec<u8>,
    },

    /// Get a value by key
    Get { cf: Option<String>, key: Vec<u8> },

    /// Delete a key
    Delete { cf: Option<String>, key: Vec<u8> },

    /// Range scan within a column family
    Scan {
        cf: Option<String>,
        start_key: Option<Vec<u8>>,
        end_key: Option<Vec<u8>>,
        limit: Option<usize>,
    },

    /// Server statistics
    Info,

    /// Persist to disk
    Flush,

    /// Ask the server to compact its storage
    Compact,
}

impl Command {
    pub fn put(cf: impl Into<String>, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Command::Put {
            cf: Some(cf.into()),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn get(cf: impl Into<String>, key: impl Into<Vec<u8>>) -> Self {
        Command::Get {
            cf: Some(cf.into()),
            key: key.into(),
        }
    }

    pub fn delete(cf: impl Into<String>, key: impl Into<Vec<u8>>) -> Self {
        Command::Delete {
            cf: Some(cf.into()),
            key: key.into(),
        }
    }

    pub fn scan(
        cf: impl Into<String>,
        start_key: impl Into<Vec<u8>>,
        end_key: Option<Vec<u8>>,
        limit: usize,
    ) -> Self {
        Command::Scan {
            cf: Some(cf.into()),
            start_key: Some(start_key.into()),
            end_key,
            limit: Some(limit),
        }
    }

    pub fn info() -> Self {
        Command::Info
    }

    pub fn flush() -> Self {
        Command::Flush
    }

    pub fn compact() -> Self {
        Command::Compact
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Put { .. } => CommandType::Put,
            Command::Get { .. } => CommandType::Get,
            Command::Delete { .. } => CommandType::Delete,
            Command::Scan { .. } => CommandType::Scan,
            Command::Info => CommandType::Info,
            Command::Flush => CommandType::Flush,
            Command::Compact => CommandType::Compact,
        }
    }
}

fn opt_cf(cf: &Option<String>) -> &str {
    cf.as_deref().unwrap_or("-")
}

fn lossy(bytes: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Put { cf, key, value } => write!(
                f,
                "Put(cf: {}, key: {}, value: {})",
                opt_cf(cf),
                lossy(key),
                lossy(value)
            ),
            Command::Get { cf, key } => {
                write!(f, "Get(cf: {}, key: {})", opt_cf(cf), lossy(key))
            }
            Command::Delete { cf, key } => {
                write!(f, "Delete(cf: {}, key: {})", opt_cf(cf), lossy(key))
            }
            Command::Scan {
                cf,
                start_key,
                end_key,
                limit,
            } => {
                write!(f, "Scan(cf: {}, start_key: ", opt_cf(cf))?;
                match start_key {
                    Some(k) => write!(f, "{}", lossy(k))?,
                    None => f.write_str("None")?,
                }
                f.write_str(", end_key: ")?;
                match end_key {
                    Some(k) => write!(f, "{}", lossy(k))?,
                    None => f.write_str("None")?,
                }
                match limit {
                    Some(n) => write!(f, ", limit: {})", n),
                    None => f.write_str(", limit: None)"),
                }
            }
            Command::Info => f.write_str("Info"),
            Command::Flush => f.write_str("Flush"),
            Command::Compact => f.write_str("Compact"),
        }
    }
}
