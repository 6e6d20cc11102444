//! # TinyKV
//!
//! Blocking client for the TinyKV column-family key-value store:
//! - JSON command/response protocol over plain TCP
//! - Byte sequences as JSON byte arrays or base64 strings
//! - One write and one bounded read per operation, no framing
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Client / SharedClient                        │
//! │   put · get · delete · scan · info · flush · compact         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Command Encoder                             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ JSON bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Transport                                │
//! │             (one write, one 8 KiB read)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ JSON bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │            Response Decoder + Byte Codec                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KvError, Result};
pub use config::ClientConfig;
pub use network::{Client, SharedClient};
pub use protocol::{Command, CommandType, EndKeyEncoding, Response, ScanItem, ServerInfo};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of TinyKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
