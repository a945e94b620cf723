//! Error types returned by clients, transports and builders.

use std::io;

use thiserror::Error;

/// Failure to hand a serialised event to the collector.
///
/// Delivery errors are returned to the caller untouched. Nothing in this
/// crate retries, buffers or reconnects after one is raised.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Socket level failure (connection refused, reset, write timeout).
    #[error("socket delivery failed: {0}")]
    Io(#[from] io::Error),
    /// The redis store rejected a command or could not be reached.
    #[error("queue store rejected event: {0}")]
    Store(#[from] redis::RedisError),
    /// The encoded event does not fit into a single datagram.
    #[error("payload of {size} bytes exceeds the {limit} byte datagram limit")]
    PayloadTooLarge { size: usize, limit: usize },
}

/// Errors surfaced by the semantic client methods.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The caller supplied a value outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The event could not be encoded as JSON.
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    /// The transport refused the payload.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl ClientError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Errors raised while building a client.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    /// The transport could not be established.
    #[error("failed to connect transport: {0}")]
    Connect(#[from] DeliveryError),
}
