//! Stream and datagram transports.
//!
//! Both variants write each event as one line of JSON text terminated by a
//! newline. The stream variant holds a TCP connection and reports write
//! failures; after one it refuses further events, and there is no reconnect. The datagram
//! variant sends one UDP datagram per event and cannot observe whether the
//! collector received it.

mod config;
mod serialise;
mod transport;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_MAX_DATAGRAM_SIZE, DEFAULT_SOCKET_PORT, SocketConfig, SocketKind};
pub use serialise::encode_line;
pub use transport::SocketTransport;
