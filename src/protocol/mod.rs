//! Protocol Module
//!
//! Defines the JSON wire protocol spoken with the server.
//!
//! ## Exchange
//! ```text
//! client                              server
//!   │  {"type":"Get","cf":..,"key":[..]}  │
//!   │ ──────────────────────────────────► │   one write
//!   │  {"Value":[..]}                     │
//!   │ ◄────────────────────────────────── │   one bounded read
//! ```
//!
//! There is no framing: a message is whatever one write carries.
//!
//! ### Commands
//! - Put:     cf, key, value
//! - Get:     cf, key
//! - Delete:  cf, key
//! - Scan:    cf, start_key, end_key?, limit
//! - Info / Flush / Compact: type only
//!
//! ### Byte sequences
//! Sent as JSON arrays of 0..=255. Received as arrays or base64 strings.

pub mod bytes;
mod command;
mod response;
mod codec;

pub use bytes::{decode_value, encode_array, encode_base64, WireBytes};
pub use command::{Command, CommandType};
pub use response::{Response, ScanItem, ServerInfo};
pub use codec::{decode_response, encode_command, EndKeyEncoding};
