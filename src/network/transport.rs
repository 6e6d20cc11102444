//! Transport
//!
//! One write and one bounded read per exchange.
//!
//! ## State Machine
//! ```text
//!   Open ──close() / I/O error──► Closed (terminal)
//! ```
//!
//! The read is a single `read` call into a fixed buffer. Whatever arrives is
//! taken as the complete response: a reply larger than the buffer, or one
//! split across segments, is cut short and will usually fail to decode.
//! A read that fills the buffer also closes the transport, since the rest of
//! that reply is still queued on the stream.

use std::io::{self, Read, Write};

use bytes::{Bytes, BytesMut};

use crate::error::{KvError, Result};

/// Connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Accepts one send/receive pair at a time
    Open,

    /// Terminal; every operation fails with [`KvError::Closed`]
    Closed,
}

/// Unframed request/response transport over any byte stream
pub struct Transport<S> {
    /// `None` once closed
    stream: Option<S>,

    /// Capacity of the single read
    buffer_size: usize,

    /// Peer address for logging
    peer: String,
}

impl<S: Read + Write> Transport<S> {
    /// Wrap an open stream
    pub fn new(stream: S, buffer_size: usize, peer: impl Into<String>) -> Self {
        Self {
            stream: Some(stream),
            buffer_size,
            peer: peer.into(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        if self.stream.is_some() {
            ConnectionState::Open
        } else {
            ConnectionState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// The underlying stream, while open
    pub fn get_ref(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    /// Write the whole payload once. Partial writes are not retried beyond
    /// what `write_all` does.
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(KvError::Closed)?;
        let result = stream.write_all(payload).and_then(|_| stream.flush());
        self.check(result)?;
        tracing::trace!("Sent {} bytes to {}", payload.len(), self.peer);
        Ok(())
    }

    /// Perform exactly one read and return what arrived
    ///
    /// If the read fills the buffer the bytes are still returned, but the
    /// transport is closed afterwards.
    pub fn receive(&mut self) -> Result<Bytes> {
        let capacity = self.buffer_size;
        let stream = self.stream.as_mut().ok_or(KvError::Closed)?;

        let mut buffer = BytesMut::zeroed(capacity);
        let result = loop {
            match stream.read(&mut buffer) {
                Ok(0) => {
                    break Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed",
                    ))
                }
                Ok(n) => break Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => break Err(e),
            }
        };
        let n = self.check(result)?;

        tracing::trace!("Received {} bytes from {}", n, self.peer);
        buffer.truncate(n);

        // The unread tail would be taken as the next reply
        if n == capacity {
            tracing::warn!(
                "Response from {} filled the {} byte read buffer; closing connection",
                self.peer,
                capacity
            );
            self.stream = None;
        }

        Ok(buffer.freeze())
    }

    /// Send a payload and read its response
    pub fn round_trip(&mut self, payload: &[u8]) -> Result<Bytes> {
        self.send(payload)?;
        self.receive()
    }

    /// Close the connection. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!("Closed connection to {}", self.peer);
        }
    }

    /// An I/O failure leaves the stream in an unknown position, so the
    /// transport is closed.
    fn check<T>(&mut self, result: io::Result<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("I/O error on connection to {}: {}", self.peer, e);
                self.stream = None;
                Err(KvError::Io(e))
            }
        }
    }
}
