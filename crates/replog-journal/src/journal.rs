//! Append-only storage for journaled records
//!
//! The journal keeps every record logged at a journaled level, in call order.
//! Entries are never edited or evicted; the only way to shrink the journal is
//! to clear it.

use replog_core::{Attrs, Level, Timestamp, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A record captured at a journaled level
///
/// Fields are private so a stored entry cannot be modified after capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournaledMessage {
    level: Level,
    timestamp: Timestamp,
    attrs: Option<Attrs>,
    msg: String,
    args: Vec<Value>,
}

impl JournaledMessage {
    /// Capture a record
    pub fn new(
        level: Level,
        timestamp: Timestamp,
        attrs: Option<Attrs>,
        msg: impl Into<String>,
        args: Vec<Value>,
    ) -> Self {
        Self {
            level,
            timestamp,
            attrs,
            msg: msg.into(),
            args,
        }
    }

    /// The level the record was originally logged at
    pub fn level(&self) -> Level {
        self.level
    }

    /// The original event time
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The original attributes, if any were attached
    pub fn attrs(&self) -> Option<&Attrs> {
        self.attrs.as_ref()
    }

    /// The message template
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// The positional formatting arguments
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Ordered, append-only list of journaled messages
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<JournaledMessage>,
}

impl Journal {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn record(&mut self, message: JournaledMessage) {
        self.entries.push(message);
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[JournaledMessage] {
        &self.entries
    }

    /// Iterate entries, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, JournaledMessage> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the journal is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get statistics about the journal
    pub fn stats(&self) -> JournalStats {
        let mut per_level = BTreeMap::new();
        for entry in &self.entries {
            *per_level.entry(entry.level).or_insert(0) += 1;
        }

        JournalStats {
            total_entries: self.entries.len(),
            per_level,
            first_recorded: self.entries.first().map(|e| e.timestamp),
            last_recorded: self.entries.last().map(|e| e.timestamp),
            replaying_at: None,
        }
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a JournaledMessage;
    type IntoIter = std::slice::Iter<'a, JournaledMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Statistics about a journal
#[derive(Debug, Clone, PartialEq)]
pub struct JournalStats {
    /// Total number of entries
    pub total_entries: usize,
    /// Entry count per original level
    pub per_level: BTreeMap<Level, usize>,
    /// Timestamp of the oldest entry
    pub first_recorded: Option<Timestamp>,
    /// Timestamp of the newest entry (by insertion, not by time)
    pub last_recorded: Option<Timestamp>,
    /// Level replay is active at, if any
    pub replaying_at: Option<Level>,
}

impl JournalStats {
    /// Entry count for one level
    pub fn count(&self, level: Level) -> usize {
        self.per_level.get(&level).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replog_core::time::unix;

    fn message(level: Level, secs: i64, msg: &str) -> JournaledMessage {
        JournaledMessage::new(level, unix(secs, 0), None, msg, Vec::new())
    }

    #[test]
    fn test_journal_keeps_call_order() {
        let mut journal = Journal::new();
        journal.record(message(Level::Info, 3, "bar"));
        journal.record(message(Level::Debug, 1, "foo"));
        journal.record(message(Level::Info, 2, "baz"));

        let msgs: Vec<&str> = journal.iter().map(|m| m.msg()).collect();
        assert_eq!(msgs, vec!["bar", "foo", "baz"]);
    }

    #[test]
    fn test_journal_stats() {
        let mut journal = Journal::new();
        assert_eq!(journal.stats().first_recorded, None);

        journal.record(message(Level::Info, 3, "bar"));
        journal.record(message(Level::Debug, 1, "foo"));
        journal.record(message(Level::Info, 2, "baz"));

        let stats = journal.stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.count(Level::Info), 2);
        assert_eq!(stats.count(Level::Debug), 1);
        assert_eq!(stats.count(Level::Fatal), 0);
        assert_eq!(stats.first_recorded, Some(unix(3, 0)));
        assert_eq!(stats.last_recorded, Some(unix(2, 0)));
    }

    #[test]
    fn test_journal_clear() {
        let mut journal = Journal::new();
        journal.record(message(Level::Debug, 1, "foo"));
        journal.clear();

        assert!(journal.is_empty());
        assert_eq!(journal.stats().total_entries, 0);
    }

    #[test]
    fn test_message_keeps_absent_attrs_absent() {
        let bare = message(Level::Debug, 1, "foo");
        assert!(bare.attrs().is_none());

        let with_attrs = JournaledMessage::new(
            Level::Debug,
            unix(1, 0),
            Some(Attrs::new()),
            "foo",
            vec![Value::Int(12)],
        );
        assert_eq!(with_attrs.attrs(), Some(&Attrs::new()));
        assert_eq!(with_attrs.args(), &[Value::Int(12)]);
    }
}
