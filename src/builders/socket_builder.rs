//! Builder for stream and datagram clients.
//!
//! Exposes transport selection and timeout tuning for [`SocketTransport`].

use std::time::Duration;

use crate::{
    client::Client,
    error::BuildError,
    socket::{SocketConfig, SocketKind, SocketTransport},
    transport::Transport,
};

use super::{TransportBuilder, ensure_positive, option_setter, validate_host};

/// Builder for [`Client`]s writing newline-delimited JSON to a socket.
///
/// Unset fields fall back to [`SocketConfig::default`]: a stream connection
/// to `localhost:2323`.
#[derive(Clone, Debug, Default)]
pub struct SocketClientBuilder {
    host: Option<String>,
    port: Option<u16>,
    kind: SocketKind,
    connect_timeout_ms: Option<u64>,
    write_timeout_ms: Option<u64>,
    max_datagram_size: Option<usize>,
}

impl SocketClientBuilder {
    /// Create a builder for a stream connection to the default collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a TCP stream to `host:port`.
    pub fn with_tcp(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = Some(host.into());
        self.port = Some(port);
        self.kind = SocketKind::Stream;
        self
    }

    /// Use UDP datagrams to `host:port`.
    pub fn with_udp(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = Some(host.into());
        self.port = Some(port);
        self.kind = SocketKind::Datagram;
        self
    }

    /// Select the socket flavour without changing the address.
    pub fn with_kind(mut self, kind: SocketKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the collector host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    option_setter!(
        #[doc = "Set the collector port."]
        with_port,
        port,
        u16
    );
    option_setter!(with_connect_timeout_ms, connect_timeout_ms, u64);
    option_setter!(with_write_timeout_ms, write_timeout_ms, u64);
    option_setter!(with_max_datagram_size, max_datagram_size, usize);

    fn validate(&self) -> Result<(), BuildError> {
        validate_host(self.host.as_deref())?;
        if let Some(port) = self.port {
            ensure_positive!(port, "port")?;
        }
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.write_timeout_ms {
            ensure_positive!(timeout, "write_timeout_ms")?;
        }
        if let Some(size) = self.max_datagram_size {
            ensure_positive!(size, "max_datagram_size")?;
        }
        Ok(())
    }

    /// Validate the settings and produce the resulting configuration.
    pub fn build_config(&self) -> Result<SocketConfig, BuildError> {
        self.validate()?;
        let mut config = SocketConfig::default().with_kind(self.kind);
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ms) = self.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.write_timeout_ms {
            config.write_timeout = Duration::from_millis(ms);
        }
        if let Some(size) = self.max_datagram_size {
            config.max_datagram_size = size;
        }
        Ok(config)
    }

    /// Open the socket and return a client.
    pub fn build(&self) -> Result<Client<SocketTransport>, BuildError> {
        let config = self.build_config()?;
        Ok(Client::new(SocketTransport::connect(&config)?))
    }
}

impl TransportBuilder for SocketClientBuilder {
    fn build_transport(&self) -> Result<Box<dyn Transport>, BuildError> {
        let config = self.build_config()?;
        Ok(Box::new(SocketTransport::connect(&config)?))
    }
}
