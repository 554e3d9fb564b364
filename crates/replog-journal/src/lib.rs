//! Replog Journal - Journal log records and replay them on demand
//!
//! This crate wraps any `replog_core::Sink` with a `ReplayJournal`:
//!
//! - **Journaling**: records at chosen levels (typically debug/info) are kept in memory
//! - **Replay**: on request, kept records are re-sent at a more urgent level,
//!   with their original timestamps and a `replayed-from-level` attribute
//! - **Escalation**: after a replay, new journaled records are re-sent immediately
//! - **Exit helpers**: `die`/`dief`/`diem` with an injectable process-exit hook
//!
//! # Example
//!
//! ```rust,ignore
//! use replog_core::{Level, LevelLogger};
//! use replog_journal::{ReplayConfig, ReplayJournal};
//! use replog_sinks::TracingSink;
//!
//! let config = ReplayConfig::load("replay.ron")?;
//! let mut log = ReplayJournal::from_config(TracingSink::new(), &config);
//!
//! log.debug("opening connection")?;
//! if let Err(err) = connect() {
//!     log.error("connect failed")?;
//!     // Surface the debug context that led up to the failure.
//!     log.replay(config.replay_level)?;
//! }
//! ```

mod config;
mod error;
mod exit;
mod journal;
mod replayer;

pub use config::ReplayConfig;
pub use error::{Error, Result};
pub use exit::{Exiter, ProcessExiter};
pub use journal::{Journal, JournalStats, JournaledMessage};
pub use replayer::{replay_attrs, ReplayJournal, ReplayState, REPLAYED_FROM_LEVEL};

// Re-export core types for convenience
pub use replog_core::{Attrs, Level, LevelLogger, LevelSet, Sink, Value};
