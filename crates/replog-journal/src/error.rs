//! Error types for replog-journal
//!
//! Journal operations themselves return `replog_core::Result`: the only
//! failures they can see come from the sink, and those are passed through
//! untouched. This type covers loading a `ReplayConfig`.

use thiserror::Error;

/// Journal error type
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RON parse error in a config file
    #[error("Config parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Result type for config loading
pub type Result<T> = std::result::Result<T, Error>;
