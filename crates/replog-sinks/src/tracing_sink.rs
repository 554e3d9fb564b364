//! Bridge from replog records to `tracing` events
//!
//! Each record becomes one event under the `replog` target. The replog level
//! maps onto the nearest tracing level (fatal becomes ERROR); the exact level
//! is kept in the `severity` field.

use replog_core::{Attrs, Error, Level, Result, Sink, Timestamp, Value};
use std::fmt;

/// Target every forwarded event is emitted under
pub const TARGET: &str = "replog";

macro_rules! emit {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            Level::Debug => tracing::event!(target: TARGET, tracing::Level::DEBUG, $($fields)+),
            Level::Info => tracing::event!(target: TARGET, tracing::Level::INFO, $($fields)+),
            Level::Warning => tracing::event!(target: TARGET, tracing::Level::WARN, $($fields)+),
            Level::Error | Level::Fatal => {
                tracing::event!(target: TARGET, tracing::Level::ERROR, $($fields)+)
            }
        }
    };
}

/// Sink that forwards records to the active `tracing` subscriber
///
/// Message templates are not rendered; the template and its arguments are
/// passed along as separate fields.
#[derive(Debug, Default)]
pub struct TracingSink {
    shut_down: bool,
}

impl TracingSink {
    /// Create a sink bound to whatever subscriber is active when it logs
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.shut_down {
            Err(Error::Closed)
        } else {
            Ok(())
        }
    }
}

/// Space-separated `Display` for positional arguments
struct Args<'a>(&'a [Value]);

impl fmt::Display for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", arg)?;
        }
        Ok(())
    }
}

fn render_attrs(attrs: Option<&Attrs>) -> String {
    attrs.map(ToString::to_string).unwrap_or_default()
}

impl Sink for TracingSink {
    fn log(
        &mut self,
        level: Level,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        self.ensure_open()?;
        let attrs = render_attrs(attrs);
        emit!(
            level,
            severity = %level,
            attrs = %attrs,
            args = %Args(args),
            "{}",
            msg
        );
        Ok(())
    }

    fn log_with_time(
        &mut self,
        level: Level,
        ts: Timestamp,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        self.ensure_open()?;
        let attrs = render_attrs(attrs);
        let time = ts.to_rfc3339();
        emit!(
            level,
            severity = %level,
            original_time = %time,
            attrs = %attrs,
            args = %Args(args),
            "{}",
            msg
        );
        Ok(())
    }

    fn shutdown_loggers(&mut self) -> Result<()> {
        tracing::debug!(target: TARGET, "tracing sink shut down");
        self.shut_down = true;
        Ok(())
    }
}
