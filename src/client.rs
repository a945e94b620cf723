//! Transport agnostic client exposing the semantic event methods.
//!
//! Every method builds an [`Event`] and passes it to
//! [`Client::queue_event`], which encodes the envelope and hands the JSON
//! text to the configured [`Transport`]. Argument validation happens before
//! any I/O, so an [`ClientError::InvalidArgument`] guarantees the transport
//! saw nothing.

use serde_json::Value;

use crate::{
    builders::TransportBuilder,
    error::{BuildError, ClientError},
    event::Event,
    gauge::{DEFAULT_FLUSH_INTERVAL, GaugeOp, GaugeValue},
    gravatar::{GravatarDefault, gravatar_url},
    transport::Transport,
};

/// Event client bound to one transport for its whole lifetime.
///
/// Clients are not internally synchronised: share one behind a mutex or
/// create one per thread.
pub struct Client<T: Transport> {
    transport: T,
}

/// Client whose transport was chosen at runtime by a builder.
pub type DynClient = Client<Box<dyn Transport>>;

impl<T: Transport> Client<T> {
    /// Wrap an already connected transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrow the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the client and return its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Encode `event` and deliver it through the transport.
    pub fn queue_event(&mut self, event: &Event) -> Result<(), ClientError> {
        let payload = event.to_json()?;
        match self.transport.deliver(&payload) {
            Ok(()) => {
                log::debug!(
                    "delivered {} event via {}",
                    event.kind(),
                    self.transport.label()
                );
                Ok(())
            }
            Err(err) => {
                log::warn!(
                    "{} transport failed to deliver {} event: {err}",
                    self.transport.label(),
                    event.kind()
                );
                Err(err.into())
            }
        }
    }

    /// Send a caller defined event.
    ///
    /// `session` is attached only when non-empty. `extra` is merged when it
    /// is a JSON object and ignored otherwise.
    pub fn event(
        &mut self,
        kind: &str,
        session: Option<&str>,
        extra: Option<&Value>,
    ) -> Result<(), ClientError> {
        let event = Event::new(kind)?
            .with_extra(extra)?
            .with_nonempty_session(session);
        self.queue_event(&event)
    }

    /// Register a page view.
    ///
    /// Unlike [`Client::event`], an empty `session` is still attached; only
    /// `None` omits it.
    pub fn pageview(&mut self, url: &str, session: Option<&str>) -> Result<(), ClientError> {
        let event = Event::with_kind("_pageview")
            .with_field("url", url)
            .with_present_session(session);
        self.queue_event(&event)
    }

    /// Set the display name for `session`.
    pub fn set_name(&mut self, name: &str, session: &str) -> Result<(), ClientError> {
        require_session(session)?;
        let event = Event::with_kind("_set_name")
            .with_field("name", name)
            .with_session(session);
        self.queue_event(&event)
    }

    /// Set the picture URL for `session`.
    pub fn set_picture(&mut self, image_url: &str, session: &str) -> Result<(), ClientError> {
        require_session(session)?;
        let event = Event::with_kind("_set_picture")
            .with_field("url", image_url)
            .with_session(session);
        self.queue_event(&event)
    }

    /// Use the gravatar of `email` as the picture for `session`.
    ///
    /// `default` must name one of the gravatar fallback styles; anything
    /// else fails before hashing or I/O.
    pub fn set_gravatar(
        &mut self,
        email: &str,
        session: &str,
        default: &str,
    ) -> Result<(), ClientError> {
        let default: GravatarDefault = default.parse()?;
        self.set_gravatar_with(email, session, default)
    }

    /// Use the gravatar of `email` with the `identicon` fallback style.
    pub fn set_default_gravatar(
        &mut self,
        email: &str,
        session: &str,
    ) -> Result<(), ClientError> {
        self.set_gravatar_with(email, session, GravatarDefault::default())
    }

    /// Typed form of [`Client::set_gravatar`].
    pub fn set_gravatar_with(
        &mut self,
        email: &str,
        session: &str,
        default: GravatarDefault,
    ) -> Result<(), ClientError> {
        require_session(session)?;
        self.set_picture(&gravatar_url(email, default), session)
    }

    /// Emit a gauge update with an explicit aggregation window.
    pub fn gauge(
        &mut self,
        op: GaugeOp,
        name: &str,
        value: impl Into<GaugeValue>,
        flush_interval: u64,
    ) -> Result<(), ClientError> {
        if name.is_empty() {
            return Err(ClientError::invalid("gauge name must not be empty"));
        }
        let value = value.into().to_json()?;
        let event = Event::with_kind(op.event_type())
            .with_field("value", value)
            .with_field("gauge", name)
            .with_field("flush_interval", flush_interval);
        self.queue_event(&event)
    }
}

macro_rules! gauge_methods {
    ($($op:ident => $name:ident, $with_interval:ident;)*) => {
        impl<T: Transport> Client<T> {
            $(
                #[doc = concat!("Emit a `_", stringify!($name), "` update using the default flush interval.")]
                pub fn $name(
                    &mut self,
                    gauge: &str,
                    value: impl Into<GaugeValue>,
                ) -> Result<(), ClientError> {
                    self.gauge(GaugeOp::$op, gauge, value, DEFAULT_FLUSH_INTERVAL)
                }

                #[doc = concat!("Emit a `_", stringify!($name), "` update with an explicit flush interval.")]
                pub fn $with_interval(
                    &mut self,
                    gauge: &str,
                    value: impl Into<GaugeValue>,
                    flush_interval: u64,
                ) -> Result<(), ClientError> {
                    self.gauge(GaugeOp::$op, gauge, value, flush_interval)
                }
            )*
        }
    };
}

gauge_methods! {
    Incr => incr, incr_with_interval;
    Decr => decr, decr_with_interval;
    Set => set, set_with_interval;
    Min => min, min_with_interval;
    Max => max, max_with_interval;
    Avg => avg, avg_with_interval;
}

impl DynClient {
    /// Build the transport described by `builder` and wrap it.
    pub fn from_builder(builder: &dyn TransportBuilder) -> Result<Self, BuildError> {
        Ok(Self::new(builder.build_transport()?))
    }
}

impl<T: Transport> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport.label())
            .finish()
    }
}

fn require_session(session: &str) -> Result<(), ClientError> {
    if session.is_empty() {
        Err(ClientError::invalid("session must not be empty"))
    } else {
        Ok(())
    }
}
