//! Builder for queue-backed clients.

use std::time::Duration;

use crate::{
    client::Client,
    error::BuildError,
    queue::{QueueConfig, QueueTransport},
    transport::Transport,
};

use super::{TransportBuilder, ensure_positive, option_setter, validate_host};

/// Builder for [`Client`]s that enqueue events into redis.
///
/// Unset fields fall back to [`QueueConfig::default`]: `localhost:6379`,
/// database 0.
#[derive(Clone, Debug, Default)]
pub struct QueueClientBuilder {
    host: Option<String>,
    port: Option<u16>,
    db: Option<i64>,
    connect_timeout_ms: Option<u64>,
    io_timeout_ms: Option<u64>,
}

impl QueueClientBuilder {
    /// Create a builder targeting the default store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the store host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    option_setter!(
        #[doc = "Set the store port."]
        with_port,
        port,
        u16
    );
    option_setter!(
        #[doc = "Select the logical database."]
        with_db,
        db,
        i64
    );
    option_setter!(with_connect_timeout_ms, connect_timeout_ms, u64);
    option_setter!(with_io_timeout_ms, io_timeout_ms, u64);

    fn validate(&self) -> Result<(), BuildError> {
        validate_host(self.host.as_deref())?;
        if let Some(port) = self.port {
            ensure_positive!(port, "port")?;
        }
        if let Some(db) = self.db
            && db < 0
        {
            return Err(BuildError::InvalidConfig("db must not be negative".into()));
        }
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.io_timeout_ms {
            ensure_positive!(timeout, "io_timeout_ms")?;
        }
        Ok(())
    }

    /// Validate the settings and produce the resulting configuration.
    pub fn build_config(&self) -> Result<QueueConfig, BuildError> {
        self.validate()?;
        let mut config = QueueConfig::default();
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(db) = self.db {
            config.db = db;
        }
        if let Some(ms) = self.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.io_timeout_ms {
            config.io_timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }

    /// Connect to the store and return a client.
    pub fn build(&self) -> Result<Client<QueueTransport>, BuildError> {
        let config = self.build_config()?;
        Ok(Client::new(QueueTransport::connect(&config)?))
    }
}

impl TransportBuilder for QueueClientBuilder {
    fn build_transport(&self) -> Result<Box<dyn Transport>, BuildError> {
        let config = self.build_config()?;
        Ok(Box::new(QueueTransport::connect(&config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_local_redis() {
        let config = QueueClientBuilder::new().build_config().expect("defaults");
        assert_eq!(config, QueueConfig::default());
    }

    #[rstest]
    fn overrides_are_applied() {
        let config = QueueClientBuilder::new()
            .with_host("redis.internal")
            .with_port(6380)
            .with_db(3)
            .with_io_timeout_ms(250)
            .build_config()
            .expect("valid overrides");
        assert_eq!(config.host, "redis.internal");
        assert_eq!(config.port, 6380);
        assert_eq!(config.db, 3);
        assert_eq!(config.io_timeout, Duration::from_millis(250));
    }

    #[rstest]
    #[case(QueueClientBuilder::new().with_host(" "), "host")]
    #[case(QueueClientBuilder::new().with_port(0), "port")]
    #[case(QueueClientBuilder::new().with_db(-1), "db")]
    #[case(QueueClientBuilder::new().with_connect_timeout_ms(0), "connect_timeout_ms")]
    fn rejects_invalid_settings(#[case] builder: QueueClientBuilder, #[case] field: &str) {
        let err = builder.build_config().expect_err("invalid setting");
        assert!(matches!(err, BuildError::InvalidConfig(msg) if msg.contains(field)));
    }
}
