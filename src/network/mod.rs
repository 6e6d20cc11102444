//! Network Module
//!
//! TCP client side of the protocol.
//!
//! ## Architecture
//! - `Transport`: one write, one bounded read, Open/Closed state
//! - `Client`: encodes commands and maps responses per operation
//! - `SharedClient`: mutex-guarded client for use from many threads

mod transport;
mod client;
mod shared;

pub use transport::{ConnectionState, Transport};
pub use client::Client;
pub use shared::SharedClient;
