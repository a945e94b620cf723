//! The keyed store seam and its redis implementation.

use std::time::Duration;

use crate::error::DeliveryError;

use super::config::QueueConfig;

/// The three store commands the queue transport relies on.
pub trait KeyedStore: Send {
    /// `SET key value`
    fn set(&mut self, key: &str, value: &str) -> Result<(), DeliveryError>;
    /// `EXPIRE key seconds`
    fn expire(&mut self, key: &str, seconds: u64) -> Result<(), DeliveryError>;
    /// `LPUSH list value`
    fn lpush(&mut self, list: &str, value: &str) -> Result<(), DeliveryError>;
}

impl KeyedStore for redis::Connection {
    fn set(&mut self, key: &str, value: &str) -> Result<(), DeliveryError> {
        redis::cmd("SET").arg(key).arg(value).query::<()>(self)?;
        Ok(())
    }

    fn expire(&mut self, key: &str, seconds: u64) -> Result<(), DeliveryError> {
        redis::cmd("EXPIRE").arg(key).arg(seconds).query::<()>(self)?;
        Ok(())
    }

    fn lpush(&mut self, list: &str, value: &str) -> Result<(), DeliveryError> {
        redis::cmd("LPUSH").arg(list).arg(value).query::<()>(self)?;
        Ok(())
    }
}

/// Open a blocking redis connection described by `config`.
pub(crate) fn connect_store(config: &QueueConfig) -> Result<redis::Connection, DeliveryError> {
    let client = redis::Client::open(config.connection_info())?;
    let conn = client.get_connection_with_timeout(config.connect_timeout)?;
    apply_io_timeout(&conn, config.io_timeout)?;
    Ok(conn)
}

fn apply_io_timeout(conn: &redis::Connection, timeout: Duration) -> Result<(), DeliveryError> {
    conn.set_read_timeout(Some(timeout))?;
    conn.set_write_timeout(Some(timeout))?;
    Ok(())
}
