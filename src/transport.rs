//! The delivery seam shared by every client variant.

use crate::error::DeliveryError;

/// Capability to hand one serialised event to the collector.
///
/// Implementations own a single long-lived connection acquired at
/// construction. Calls block until the transport accepted or rejected the
/// payload; nothing is buffered or retried.
pub trait Transport: Send {
    /// Deliver `payload`, the JSON text of one event envelope.
    fn deliver(&mut self, payload: &str) -> Result<(), DeliveryError>;

    /// Short label used in log output.
    fn label(&self) -> &'static str;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn deliver(&mut self, payload: &str) -> Result<(), DeliveryError> {
        (**self).deliver(payload)
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }
}
