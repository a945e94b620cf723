//! Redis backed event queue.
//!
//! Each event body is stored under `fnordmetric-event-<id>` with a sixty
//! second expiry, and `<id>` is pushed onto the head of `fnordmetric-queue`
//! for the collector to discover. Delivery is fire and forget: a collector
//! that does not drain the queue inside the expiry window finds the id but
//! no body. Ids come from 33 random bytes, so identical events never share
//! a key.

mod config;
mod event_id;
mod store;
mod transport;


pub use config::{
    DEFAULT_QUEUE_PORT, EVENT_KEY_PREFIX, EVENT_TTL_SECS, QUEUE_LIST, QueueConfig, event_key,
};
pub use event_id::{EVENT_ID_BYTES, EventIdGenerator};
pub use store::KeyedStore;
pub use transport::QueueTransport;
