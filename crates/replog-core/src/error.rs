//! Error types for replog-core

use thiserror::Error;

/// Sink error type
///
/// Every failure a [`Sink`](crate::Sink) can report. Decorators such as the
/// replay journal never construct these themselves; they only relay what the
/// downstream sink returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Sink is shut down")]
    Closed,

    #[error("Invalid level: {0}")]
    InvalidLevel(String),
}

impl Error {
    /// Create a sink error from anything printable
    pub fn sink(reason: impl Into<String>) -> Self {
        Error::Sink(reason.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Sinks may be handed across threads by their owners even though the journal
// itself is single-threaded, so keep the error type Send + Sync.
fn _assert_error_send_sync<T: Send + Sync>() {}
fn _error_is_send_sync() {
    _assert_error_send_sync::<Error>();
}
