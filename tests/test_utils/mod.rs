pub mod fixtures;

pub use fixtures::{queue_client, recording_client, sent_events};
