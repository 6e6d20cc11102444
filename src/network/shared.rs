//! Shared client
//!
//! Serializes access to one connection from several threads.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::protocol::{Command, Response, ScanItem, ServerInfo};

use super::Client;

/// A [`Client`] behind a mutex
///
/// Each call holds the lock for the full send/receive pair, so requests from
/// different threads never interleave on the socket.
pub struct SharedClient<S = TcpStream> {
    inner: Arc<Mutex<Client<S>>>,
}

impl<S> Clone for SharedClient<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedClient<TcpStream> {
    pub fn connect(addr: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Client::connect(addr)?))
    }
}

impl<S: Read + Write> SharedClient<S> {
    pub fn new(client: Client<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub fn execute(&self, command: &Command) -> Result<Response> {
        self.inner.lock().execute(command)
    }

    pub fn put(&self, cf: &str, key: &str, value: &str) -> Result<()> {
        self.inner.lock().put(cf, key, value)
    }

    pub fn get(&self, cf: &str, key: &str) -> Result<Option<String>> {
        self.inner.lock().get(cf, key)
    }

    pub fn get_bytes(&self, cf: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.lock().get_bytes(cf, key)
    }

    pub fn delete(&self, cf: &str, key: &str) -> Result<()> {
        self.inner.lock().delete(cf, key)
    }

    pub fn scan(
        &self,
        cf: &str,
        start_key: &str,
        end_key: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScanItem>> {
        self.inner.lock().scan(cf, start_key, end_key, limit)
    }

    pub fn info(&self) -> Result<ServerInfo> {
        self.inner.lock().info()
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    pub fn compact(&self) -> Result<()> {
        self.inner.lock().compact()
    }

    /// Closes the connection for every clone
    pub fn close(&self) -> Result<()> {
        self.inner.lock().close()
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().is_open()
    }
}
