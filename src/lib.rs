//! Client for emitting fnordmetric events.
//!
//! A [`Client`] turns semantic calls (page views, session names and
//! pictures, gauge updates, caller defined events) into JSON envelopes and
//! hands them to one of three transports chosen at construction:
//!
//! - [`QueueTransport`]: stores each event in redis with a sixty second
//!   expiry and pushes its id onto `fnordmetric-queue`.
//! - [`SocketTransport`] in [`SocketKind::Stream`] mode: one JSON line per
//!   event over a TCP connection.
//! - [`SocketTransport`] in [`SocketKind::Datagram`] mode: one JSON line per
//!   UDP datagram, with no delivery feedback.
//!
//! Calls are synchronous and unbuffered. Failures are returned to the caller
//! and never retried.

pub mod builders;
pub mod client;
pub mod error;
pub mod event;
pub mod gauge;
pub mod gravatar;
pub mod queue;
pub mod socket;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use builders::{QueueClientBuilder, SocketClientBuilder, TransportBuilder};
pub use client::{Client, DynClient};
pub use error::{BuildError, ClientError, DeliveryError};
pub use event::{Event, SESSION_KEY, TYPE_KEY};
pub use gauge::{DEFAULT_FLUSH_INTERVAL, GaugeOp, GaugeValue};
pub use gravatar::{GravatarDefault, email_hash, gravatar_url};
pub use queue::{KeyedStore, QueueConfig, QueueTransport};
pub use socket::{SocketConfig, SocketKind, SocketTransport};
pub use transport::Transport;

/// Client enqueueing events into redis.
pub type QueueClient = Client<QueueTransport>;
/// Client writing events to a stream or datagram socket.
pub type SocketClient = Client<SocketTransport>;
