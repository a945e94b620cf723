//! Connection settings and key layout for the queue transport.

use std::time::Duration;

/// Default redis port.
pub const DEFAULT_QUEUE_PORT: u16 = 6379;
/// Prefix of the key holding each event body.
pub const EVENT_KEY_PREFIX: &str = "fnordmetric-event-";
/// List the collector polls for new event ids.
pub const QUEUE_LIST: &str = "fnordmetric-queue";
/// Lifetime of an event body in the store.
pub const EVENT_TTL_SECS: u64 = 60;
/// Default timeout for establishing the store connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default read and write timeout applied to store commands.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(1);

/// Store key for the event body with the given id.
pub fn event_key(id: &str) -> String {
    format!("{EVENT_KEY_PREFIX}{id}")
}

/// Where and how to reach the redis store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    pub host: String,
    pub port: u16,
    pub db: i64,
    pub connect_timeout: Duration,
    pub io_timeout: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: DEFAULT_QUEUE_PORT,
            db: 0,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }
}

impl QueueConfig {
    pub(crate) fn connection_info(&self) -> redis::ConnectionInfo {
        redis::ConnectionInfo {
            addr: redis::ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: redis::RedisConnectionInfo {
                db: self.db,
                ..Default::default()
            },
        }
    }
}
