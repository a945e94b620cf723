use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};

use crate::error::ClientError;

/// Aggregation window hint sent with gauge updates, in seconds.
pub const DEFAULT_FLUSH_INTERVAL: u64 = 60;

/// Gauge operation understood by the collector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GaugeOp {
    Incr,
    Decr,
    Set,
    Min,
    Max,
    Avg,
}

impl GaugeOp {
    pub const ALL: [GaugeOp; 6] = [
        GaugeOp::Incr,
        GaugeOp::Decr,
        GaugeOp::Set,
        GaugeOp::Min,
        GaugeOp::Max,
        GaugeOp::Avg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GaugeOp::Incr => "incr",
            GaugeOp::Decr => "decr",
            GaugeOp::Set => "set",
            GaugeOp::Min => "min",
            GaugeOp::Max => "max",
            GaugeOp::Avg => "avg",
        }
    }

    /// Event kind emitted for this operation, e.g. `_incr`.
    pub fn event_type(self) -> &'static str {
        match self {
            GaugeOp::Incr => "_incr",
            GaugeOp::Decr => "_decr",
            GaugeOp::Set => "_set",
            GaugeOp::Min => "_min",
            GaugeOp::Max => "_max",
            GaugeOp::Avg => "_avg",
        }
    }
}

impl fmt::Display for GaugeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GaugeOp {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('_').to_ascii_lowercase().as_str() {
            "incr" => Ok(Self::Incr),
            "decr" => Ok(Self::Decr),
            "set" => Ok(Self::Set),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "avg" => Ok(Self::Avg),
            _ => Err(ClientError::invalid(format!("unknown gauge operation: {s}"))),
        }
    }
}

/// Numeric value carried by a gauge update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GaugeValue {
    Int(i64),
    Float(f64),
}

impl GaugeValue {
    pub(crate) fn to_json(self) -> Result<Value, ClientError> {
        match self {
            GaugeValue::Int(v) => Ok(Value::from(v)),
            GaugeValue::Float(v) => Number::from_f64(v).map(Value::Number).ok_or_else(|| {
                ClientError::invalid(format!("gauge value must be finite, got {v}"))
            }),
        }
    }
}

impl From<i64> for GaugeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for GaugeValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for GaugeValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for GaugeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for GaugeValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}
