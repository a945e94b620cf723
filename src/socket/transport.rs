//! Socket transport primitives.

use std::{
    io::{self, Write},
    net::{Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket},
};

use crate::{error::DeliveryError, transport::Transport};

use super::{
    config::{SocketConfig, SocketKind},
    serialise::{datagram_line, encode_line},
};

/// Open socket held for the lifetime of the transport.
enum ActiveConnection {
    Tcp(TcpStream),
    Udp(UdpSocket),
}

impl ActiveConnection {
    fn write_line(&mut self, line: &[u8]) -> io::Result<()> {
        match self {
            ActiveConnection::Tcp(stream) => {
                stream.write_all(line)?;
                stream.flush()
            }
            ActiveConnection::Udp(socket) => match socket.send(line) {
                Ok(_) => Ok(()),
                // A previous datagram drew an ICMP port unreachable. Datagram
                // delivery never reports far-end loss, so neither does this.
                Err(err) if err.kind() == io::ErrorKind::ConnectionRefused => {
                    log::debug!("datagram collector unreachable: {err}");
                    Ok(())
                }
                Err(err) => Err(err),
            },
        }
    }
}

fn resolve(config: &SocketConfig) -> io::Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = (config.host.as_str(), config.port)
        .to_socket_addrs()?
        .collect();
    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}:{} resolved to no addresses", config.host, config.port),
        ));
    }
    Ok(addrs)
}

fn connect_tcp(config: &SocketConfig) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in resolve(config)? {
        match TcpStream::connect_timeout(&addr, config.connect_timeout) {
            Ok(stream) => {
                stream.set_nonblocking(false)?;
                stream.set_write_timeout(Some(config.write_timeout))?;
                return Ok(stream);
            }
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::TimedOut,
            format!("unable to connect to {}:{}", config.host, config.port),
        )
    }))
}

/// Pick the address datagrams are sent to, preferring IPv4.
///
/// Hosts such as `localhost` often resolve to `::1` first while collectors
/// listen on IPv4 only. Without a handshake a wrong pick would go unnoticed.
pub(super) fn datagram_target(addrs: &[SocketAddr]) -> Option<SocketAddr> {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}

fn connect_udp(config: &SocketConfig) -> io::Result<UdpSocket> {
    let addrs = resolve(config)?;
    let Some(target) = datagram_target(&addrs) else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}:{} resolved to no addresses", config.host, config.port),
        ));
    };
    let local: SocketAddr = if target.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };
    let socket = UdpSocket::bind(local)?;
    socket.connect(target)?;
    socket.set_write_timeout(Some(config.write_timeout))?;
    Ok(socket)
}

/// Transport writing newline-delimited JSON to a stream or datagram socket.
///
/// A stream write that fails may leave part of a line on the wire. The
/// transport is then poisoned and rejects every later event, since anything
/// written after the fragment would corrupt the collector's next line.
pub struct SocketTransport {
    conn: ActiveConnection,
    kind: SocketKind,
    max_datagram_size: usize,
    poisoned: bool,
}

impl SocketTransport {
    /// Open the socket described by `config`.
    pub fn connect(config: &SocketConfig) -> Result<Self, DeliveryError> {
        let conn = match config.kind {
            SocketKind::Stream => ActiveConnection::Tcp(connect_tcp(config)?),
            SocketKind::Datagram => ActiveConnection::Udp(connect_udp(config)?),
        };
        log::debug!(
            "opened {} transport to {}:{}",
            config.kind,
            config.host,
            config.port
        );
        Ok(Self {
            conn,
            kind: config.kind,
            max_datagram_size: config.max_datagram_size,
            poisoned: false,
        })
    }

    /// Socket flavour in use.
    pub fn kind(&self) -> SocketKind {
        self.kind
    }

    /// Whether an earlier failed write has taken the stream out of service.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }
}

impl Transport for SocketTransport {
    fn deliver(&mut self, payload: &str) -> Result<(), DeliveryError> {
        if self.poisoned {
            return Err(DeliveryError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "stream closed after an earlier failed write",
            )));
        }
        let line = match self.kind {
            SocketKind::Stream => encode_line(payload),
            SocketKind::Datagram => datagram_line(payload, self.max_datagram_size).ok_or(
                DeliveryError::PayloadTooLarge {
                    size: payload.len() + 1,
                    limit: self.max_datagram_size,
                },
            )?,
        };
        if let Err(err) = self.conn.write_line(&line) {
            if self.kind == SocketKind::Stream {
                self.poisoned = true;
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn label(&self) -> &'static str {
        match self.kind {
            SocketKind::Stream => "stream",
            SocketKind::Datagram => "datagram",
        }
    }
}

impl std::fmt::Debug for SocketTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketTransport")
            .field("kind", &self.kind)
            .field("max_datagram_size", &self.max_datagram_size)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}
