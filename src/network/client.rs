//! Client
//!
//! Blocking client for a TinyKV server. Each operation is one encoded
//! command, one exchange on the transport, and one decoded response.

use std::io::{self, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{KvError, Result};
use crate::protocol::{
    decode_response, encode_command, Command, CommandType, EndKeyEncoding, Response, ScanItem,
    ServerInfo,
};

use super::transport::Transport;

/// A connection to a TinyKV server
///
/// Operations take `&mut self`: the protocol carries no request ids, so a
/// connection serves one request at a time. Use
/// [`SharedClient`](super::SharedClient) to share one between threads.
///
/// ```rust,no_run
/// use tinykv::Client;
///
/// let mut client = Client::connect("127.0.0.1:8080")?;
/// client.put("default", "name", "Alice")?;
/// assert_eq!(client.get("default", "name")?, Some("Alice".to_string()));
/// client.close()?;
/// # Ok::<(), tinykv::KvError>(())
/// ```
pub struct Client<S = TcpStream> {
    transport: Transport<S>,
    end_key_encoding: EndKeyEncoding,
    addr: String,
}

impl Client<TcpStream> {
    /// Connect to `addr` with default settings
    pub fn connect(addr: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::builder().addr(addr).build();
        Self::connect_with_config(&config)
    }

    /// Connect using the given configuration
    ///
    /// There is no reconnect: a failed dial is returned as
    /// [`KvError::Connect`].
    pub fn connect_with_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        tracing::info!("Connecting to {}", config.addr);

        let connect_err = |source| KvError::Connect {
            addr: config.addr.clone(),
            source,
        };
        let stream = dial(&config.addr, config.connect_timeout()).map_err(connect_err)?;
        if config.nodelay {
            stream.set_nodelay(true).map_err(connect_err)?;
        }

        tracing::info!("Connected to {}", config.addr);
        Self::from_stream(stream, config)
    }
}

/// Try each resolved address once with the given timeout
fn dial(addr: &str, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for socket_addr in addr.to_socket_addrs()? {
        match TcpStream::connect_timeout(&socket_addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Dial {} failed: {}", socket_addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")
    }))
}

impl<S: Read + Write> Client<S> {
    /// Use an already connected stream
    pub fn from_stream(stream: S, config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport: Transport::new(stream, config.read_buffer_size, config.addr.clone()),
            end_key_encoding: config.end_key_encoding,
            addr: config.addr.clone(),
        })
    }

    /// Send one command and decode the reply
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        let payload = encode_command(command, self.end_key_encoding)?;
        tracing::debug!("{} -> {}", command, self.addr);

        let reply = self.transport.round_trip(&payload)?;
        decode_response(&reply)
    }

    /// Store `value` under `key` in column family `cf`
    pub fn put(&mut self, cf: &str, key: &str, value: &str) -> Result<()> {
        self.execute(&Command::put(cf, key, value))?
            .into_ack(CommandType::Put)
    }

    /// Get the value of `key`, or `None` if it does not exist
    ///
    /// # Errors
    ///
    /// * `KvError::Decode` if the stored value is not UTF-8
    pub fn get(&mut self, cf: &str, key: &str) -> Result<Option<String>> {
        match self.get_bytes(cf, key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| KvError::decode("value is not valid UTF-8")),
            None => Ok(None),
        }
    }

    /// Like [`get`](Self::get) without the UTF-8 requirement
    pub fn get_bytes(&mut self, cf: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.execute(&Command::get(cf, key))?.into_get()
    }

    pub fn delete(&mut self, cf: &str, key: &str) -> Result<()> {
        self.execute(&Command::delete(cf, key))?
            .into_ack(CommandType::Delete)
    }

    /// Scan `cf` from `start_key`, up to `end_key` if given, returning at
    /// most `limit` pairs
    pub fn scan(
        &mut self,
        cf: &str,
        start_key: &str,
        end_key: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScanItem>> {
        let command = Command::scan(cf, start_key, end_key.map(|k| k.as_bytes().to_vec()), limit);
        self.execute(&command)?.into_scan()
    }

    /// Key count and column families
    pub fn info(&mut self) -> Result<ServerInfo> {
        self.execute(&Command::info())?.into_info()
    }

    /// Ask the server to persist its data
    pub fn flush(&mut self) -> Result<()> {
        self.execute(&Command::flush())?
            .into_ack(CommandType::Flush)
    }

    pub fn compact(&mut self) -> Result<()> {
        self.execute(&Command::compact())?
            .into_ack(CommandType::Compact)
    }

    /// Close the connection. Later operations fail with
    /// [`KvError::Closed`]; closing twice is fine.
    pub fn close(&mut self) -> Result<()> {
        if self.transport.is_open() {
            tracing::info!("Closing connection to {}", self.addr);
        }
        self.transport.close();
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// The address this client was configured with
    pub fn server_addr(&self) -> &str {
        &self.addr
    }
}
