//! Log severities
//!
//! Provides the ordered severity scale shared by every sink:
//! - `Level` - A single severity, ordered from least to most urgent
//! - `LevelSet` - A fixed set of severities (e.g. the levels a journal records)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record
///
/// Levels are totally ordered: a greater level is more urgent, so
/// `Level::Fatal > Level::Error > Level::Warning > Level::Info > Level::Debug`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Diagnostic detail, usually discarded
    #[default]
    Debug,
    /// Routine operational messages
    Info,
    /// Something unexpected that the program recovered from
    Warning,
    /// A failed operation
    Error,
    /// The program cannot continue
    Fatal,
}

impl Level {
    /// All levels, least urgent first
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Get the lowercase name of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "dbg" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" | "err" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

/// An immutable set of levels
///
/// Backed by a bitmask, so membership checks are O(1) and the set is `Copy`.
///
/// # Example
///
/// ```
/// use replog_core::{Level, LevelSet};
///
/// let set: LevelSet = [Level::Debug, Level::Info].into_iter().collect();
/// assert!(set.contains(Level::Debug));
/// assert!(!set.contains(Level::Error));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LevelSet(u8);

impl LevelSet {
    /// Create an empty set
    pub fn empty() -> Self {
        Self(0)
    }

    /// Check if a level is in the set
    pub fn contains(&self, level: Level) -> bool {
        self.0 & level.bit() != 0
    }

    /// Check if the set holds no levels
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of levels in the set
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the levels in the set, least urgent first
    pub fn iter(&self) -> impl Iterator<Item = Level> {
        let set = *self;
        Level::ALL.into_iter().filter(move |l| set.contains(*l))
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        Self(iter.into_iter().fold(0, |bits, level| bits | level.bit()))
    }
}

impl<'a> FromIterator<&'a Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = &'a Level>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, level) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", level)?;
        }
        write!(f, "}}")
    }
}
