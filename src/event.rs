//! Event envelope construction.
//!
//! An [`Event`] is the uniform mapping every client method produces before
//! handing it to a transport. It always carries `_type`, optionally
//! `_session`, and whatever fields the event kind defines. Envelopes are
//! built fresh for each call and never mutated once queued.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Reserved key naming the event kind.
pub const TYPE_KEY: &str = "_type";
/// Reserved key carrying the caller supplied session.
pub const SESSION_KEY: &str = "_session";

/// A single event envelope.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    /// Start an envelope for a caller defined event kind.
    ///
    /// Fails with [`ClientError::InvalidArgument`] when `kind` is empty.
    pub fn new(kind: impl Into<String>) -> Result<Self, ClientError> {
        let kind = kind.into();
        if kind.is_empty() {
            return Err(ClientError::invalid("event type must not be empty"));
        }
        Ok(Self::with_kind(kind))
    }

    pub(crate) fn with_kind(kind: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(TYPE_KEY.into(), Value::String(kind.into()));
        Self { fields }
    }

    /// Event kind stored under `_type`.
    pub fn kind(&self) -> &str {
        self.fields
            .get(TYPE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Session stored under `_session`, if any.
    pub fn session(&self) -> Option<&str> {
        self.fields.get(SESSION_KEY).and_then(Value::as_str)
    }

    /// Look up a single field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, reserved keys included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(crate) fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Attach a session unconditionally.
    pub fn with_session(self, session: impl Into<String>) -> Self {
        self.with_field(SESSION_KEY, session.into())
    }

    /// Attach `session` only when it is present and non-empty.
    pub fn with_nonempty_session(self, session: Option<&str>) -> Self {
        match session {
            Some(s) if !s.is_empty() => self.with_session(s),
            _ => self,
        }
    }

    /// Attach `session` whenever it is present, even when empty.
    pub fn with_present_session(self, session: Option<&str>) -> Self {
        match session {
            Some(s) => self.with_session(s),
            None => self,
        }
    }

    /// Merge the entries of `extra` into the envelope.
    ///
    /// Only JSON objects are merged. Any other value is ignored without an
    /// error. Keys that collide with `_type` or `_session` are rejected.
    pub fn with_extra(mut self, extra: Option<&Value>) -> Result<Self, ClientError> {
        let Some(extra) = extra else {
            return Ok(self);
        };
        let Some(map) = extra.as_object() else {
            log::debug!("ignoring non-object extra fields for event {}", self.kind());
            return Ok(self);
        };
        if let Some(key) = map.keys().find(|k| matches!(k.as_str(), TYPE_KEY | SESSION_KEY)) {
            return Err(ClientError::invalid(format!(
                "extra field {key:?} collides with a reserved envelope key"
            )));
        }
        for (key, value) in map {
            self.fields.insert(key.clone(), value.clone());
        }
        Ok(self)
    }

    /// Encode the envelope as compact JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
