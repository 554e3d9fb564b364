//! Replay configuration
//!
//! Loaded from RON, e.g.
//!
//! ```ron
//! (
//!     journaled_levels: [debug, info],
//!     replay_level: error,
//! )
//! ```

use crate::error::Result;
use replog_core::{Level, LevelSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Which levels to journal and where to replay them
///
/// Missing fields fall back to their defaults.
///
/// # Example
///
/// ```
/// use replog_core::Level;
/// use replog_journal::ReplayConfig;
///
/// let config = ReplayConfig::from_ron_str("(journaled_levels: [debug])").unwrap();
/// assert_eq!(config.journaled_levels, vec![Level::Debug]);
/// assert_eq!(config.replay_level, Level::Error);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Levels whose records are journaled
    pub journaled_levels: Vec<Level>,
    /// Level the application replays at when it decides something went wrong
    pub replay_level: Level,
}

impl ReplayConfig {
    /// Parse a config from RON text
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load a config from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// The journaled levels as a set
    pub fn level_set(&self) -> LevelSet {
        self.journaled_levels.iter().collect()
    }
}

impl Default for ReplayConfig {
    /// Journal debug and info, replay at error
    fn default() -> Self {
        Self {
            journaled_levels: vec![Level::Debug, Level::Info],
            replay_level: Level::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_full_config() {
        let config = ReplayConfig::from_ron_str(
            r#"(
                journaled_levels: [info, warning],
                replay_level: fatal,
            )"#,
        )
        .unwrap();

        assert_eq!(config.journaled_levels, vec![Level::Info, Level::Warning]);
        assert_eq!(config.replay_level, Level::Fatal);
        assert!(config.level_set().contains(Level::Warning));
        assert!(!config.level_set().contains(Level::Debug));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReplayConfig::from_ron_str("()").unwrap();
        assert_eq!(config, ReplayConfig::default());
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = ReplayConfig::from_ron_str("(replay_level: loud)").unwrap_err();
        assert!(matches!(err, Error::Ron(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ReplayConfig::load("/nonexistent/replay.ron").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_config_roundtrips_through_ron() {
        let config = ReplayConfig {
            journaled_levels: vec![Level::Debug],
            replay_level: Level::Warning,
        };
        let text = ron::to_string(&config).unwrap();
        assert_eq!(ReplayConfig::from_ron_str(&text).unwrap(), config);
    }
}
