//! Configuration consumed by [`SocketTransport`](super::SocketTransport).

use std::fmt;
use std::time::Duration;

/// Default collector port for stream and datagram events.
pub const DEFAULT_SOCKET_PORT: u16 = 2323;
/// Default timeout when establishing a stream connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default timeout applied to each socket write.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(1);
/// Largest UDP payload deliverable over IPv4.
pub const DEFAULT_MAX_DATAGRAM_SIZE: usize = 65_507;

/// Socket flavour used to reach the collector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SocketKind {
    /// Ordered, reliable TCP connection.
    #[default]
    Stream,
    /// Connectionless UDP datagrams.
    Datagram,
}

impl fmt::Display for SocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SocketKind::Stream => "stream",
            SocketKind::Datagram => "datagram",
        })
    }
}

/// Configuration object describing how to open a socket transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocketConfig {
    pub host: String,
    pub port: u16,
    pub kind: SocketKind,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    pub max_datagram_size: usize,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: DEFAULT_SOCKET_PORT,
            kind: SocketKind::Stream,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            max_datagram_size: DEFAULT_MAX_DATAGRAM_SIZE,
        }
    }
}

impl SocketConfig {
    /// Override the socket flavour.
    pub fn with_kind(mut self, kind: SocketKind) -> Self {
        self.kind = kind;
        self
    }

    /// Override the collector address.
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }
}
