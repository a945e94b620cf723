//! Random identifiers for queued events.

use base64::{Engine, engine::general_purpose::URL_SAFE};
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Number of random bytes behind every event id.
pub const EVENT_ID_BYTES: usize = 33;

/// Produces URL-safe base64 ids from a cryptographically secure generator.
pub struct EventIdGenerator {
    rng: StdRng,
}

impl EventIdGenerator {
    /// Seed a generator from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw a fresh id. 33 bytes encode to 44 characters without padding.
    pub fn next_id(&mut self) -> String {
        let mut bytes = [0u8; EVENT_ID_BYTES];
        self.rng.fill_bytes(&mut bytes);
        URL_SAFE.encode(bytes)
    }
}

impl Default for EventIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
