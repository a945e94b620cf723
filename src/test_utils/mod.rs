//! In-memory collaborators for exercising clients without a network.
//!
//! Compiled for unit tests and, behind the `test-util` feature, for the
//! integration tests under `tests/`.

mod memory_store;
mod recording_transport;

pub use memory_store::MemoryStore;
pub use recording_transport::RecordingTransport;
