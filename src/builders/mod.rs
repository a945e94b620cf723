//! Fluent builders for queue and socket clients.
//!
//! Each builder validates its settings, opens the transport and returns a
//! ready [`Client`](crate::Client). Builders also implement
//! [`TransportBuilder`] so callers can pick a transport at runtime and keep
//! a single [`DynClient`](crate::DynClient) type.

use crate::{error::BuildError, transport::Transport};

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(BuildError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

pub(crate) use {ensure_positive, option_setter};

pub mod queue_builder;
pub mod socket_builder;

pub use queue_builder::QueueClientBuilder;
pub use socket_builder::SocketClientBuilder;

/// Trait implemented by all transport builders.
pub trait TransportBuilder: Send + Sync {
    /// Validate the settings and open the transport.
    fn build_transport(&self) -> Result<Box<dyn Transport>, BuildError>;
}

fn validate_host(host: Option<&str>) -> Result<(), BuildError> {
    match host {
        Some(h) if h.trim().is_empty() => {
            Err(BuildError::InvalidConfig("host must not be empty".into()))
        }
        _ => Ok(()),
    }
}
