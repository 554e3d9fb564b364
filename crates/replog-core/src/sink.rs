//! The sink contract
//!
//! A sink is the downstream end of a logging pipeline: it receives fully
//! described records and writes them somewhere. Decorators (such as the replay
//! journal) implement `Sink` too, so they can be stacked.

use crate::error::Result;
use crate::level::Level;
use crate::time::Timestamp;
use crate::value::{Attrs, Value};
use serde::{Deserialize, Serialize};

/// Destination for log records
///
/// Calls are synchronous: a slow sink makes its caller slow.
pub trait Sink {
    /// Log a record, letting the sink pick the timestamp
    fn log(
        &mut self,
        level: Level,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()>;

    /// Log a record that happened at `ts`
    fn log_with_time(
        &mut self,
        level: Level,
        ts: Timestamp,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()>;

    /// Flush and close every underlying destination
    fn shutdown_loggers(&mut self) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn log(
        &mut self,
        level: Level,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        (**self).log(level, attrs, msg, args)
    }

    fn log_with_time(
        &mut self,
        level: Level,
        ts: Timestamp,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        (**self).log_with_time(level, ts, attrs, msg, args)
    }

    fn shutdown_loggers(&mut self) -> Result<()> {
        (**self).shutdown_loggers()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn log(
        &mut self,
        level: Level,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        (**self).log(level, attrs, msg, args)
    }

    fn log_with_time(
        &mut self,
        level: Level,
        ts: Timestamp,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        (**self).log_with_time(level, ts, attrs, msg, args)
    }

    fn shutdown_loggers(&mut self) -> Result<()> {
        (**self).shutdown_loggers()
    }
}

/// An owned copy of everything a sink was handed
///
/// `timestamp` is `None` when the record arrived through [`Sink::log`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Severity the record was emitted at
    pub level: Level,
    /// Event time, if the caller supplied one
    pub timestamp: Option<Timestamp>,
    /// Attributes, if any were attached
    pub attrs: Option<Attrs>,
    /// Message template
    pub msg: String,
    /// Positional formatting arguments
    pub args: Vec<Value>,
}

impl Record {
    /// Capture a record from borrowed sink arguments
    pub fn capture(
        level: Level,
        timestamp: Option<Timestamp>,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Self {
        Self {
            level,
            timestamp,
            attrs: attrs.cloned(),
            msg: msg.to_string(),
            args: args.to_vec(),
        }
    }

    /// Read an attribute, if the record has attributes at all
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(key))
    }
}
