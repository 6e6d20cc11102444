//! Configuration for the TinyKV client
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{KvError, Result};
use crate::protocol::EndKeyEncoding;

/// Default server address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Default capacity of the single response read
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Main configuration for a client connection
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Server address (host:port)
    pub addr: String,

    /// Dial timeout (milliseconds). Applies to connection setup only.
    pub connect_timeout_ms: u64,

    /// Disable Nagle's algorithm on the socket
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the buffer used for the one read per response
    pub read_buffer_size: usize,

    /// How Scan end keys are put on the wire
    pub end_key_encoding: EndKeyEncoding,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            connect_timeout_ms: 5000,
            nodelay: true,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            end_key_encoding: EndKeyEncoding::Raw,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Connect timeout as a `Duration`
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Reject settings that would make every operation fail
    pub fn validate(&self) -> Result<()> {
        if self.addr.is_empty() {
            return Err(KvError::Config("server address is empty".to_string()));
        }
        if self.connect_timeout_ms == 0 {
            return Err(KvError::Config(
                "connect timeout must be greater than zero".to_string(),
            ));
        }
        if self.read_buffer_size == 0 {
            return Err(KvError::Config(
                "read buffer size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the server address
    pub fn addr(mut self, addr: impl Into<String>) -> Self {
        self.config.addr = addr.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the response read buffer capacity (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the Scan end key encoding
    pub fn end_key_encoding(mut self, encoding: EndKeyEncoding) -> Self {
        self.config.end_key_encoding = encoding;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
