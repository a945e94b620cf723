//! A transport that keeps every payload it is handed.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{error::DeliveryError, transport::Transport};

#[derive(Default)]
struct Recorded {
    payloads: Vec<String>,
    calls: usize,
    fail_next: Option<String>,
}

/// Transport storing payloads for later inspection.
///
/// Clones share the same record so a test can keep one handle while the
/// client owns another.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<Mutex<Recorded>>,
}

impl RecordingTransport {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads accepted so far, in delivery order.
    pub fn payloads(&self) -> Vec<String> {
        self.inner.lock().payloads.clone()
    }

    /// Number of `deliver` calls, failed ones included.
    pub fn calls(&self) -> usize {
        self.inner.lock().calls
    }

    /// Make the next delivery fail with an I/O error carrying `msg`.
    pub fn fail_next(&self, msg: impl Into<String>) {
        self.inner.lock().fail_next = Some(msg.into());
    }
}

impl Transport for RecordingTransport {
    fn deliver(&mut self, payload: &str) -> Result<(), DeliveryError> {
        let mut inner = self.inner.lock();
        inner.calls += 1;
        if let Some(msg) = inner.fail_next.take() {
            return Err(DeliveryError::Io(io::Error::other(msg)));
        }
        inner.payloads.push(payload.to_owned());
        Ok(())
    }

    fn label(&self) -> &'static str {
        "recording"
    }
}
