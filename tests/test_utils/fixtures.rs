//! Fixtures pairing a client with the in-memory collaborator it writes to.
//! Tests keep the collaborator handle to inspect what the client delivered.

use fnordmetric::{
    Client, QueueTransport,
    test_utils::{MemoryStore, RecordingTransport},
};
use rstest::fixture;

/// Client backed by a recording transport.
#[fixture]
pub fn recording_client() -> (RecordingTransport, Client<RecordingTransport>) {
    let recorder = RecordingTransport::new();
    let client = Client::new(recorder.clone());
    (recorder, client)
}

/// Client backed by an in-memory queue store.
#[fixture]
pub fn queue_client() -> (MemoryStore, Client<QueueTransport<MemoryStore>>) {
    let store = MemoryStore::new();
    let client = Client::new(QueueTransport::new(store.clone()));
    (store, client)
}

/// Decode every payload the recorder accepted.
#[allow(dead_code)]
pub fn sent_events(recorder: &RecordingTransport) -> Vec<serde_json::Value> {
    recorder
        .payloads()
        .iter()
        .map(|p| serde_json::from_str(p).expect("payload is JSON"))
        .collect()
}
