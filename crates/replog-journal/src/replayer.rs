//! The replay journal
//!
//! `ReplayJournal` wraps a sink. Every record is forwarded to the sink right
//! away; records at one of the journaled levels are also kept. Calling
//! [`ReplayJournal::replay`] re-sends the kept records at a more urgent level,
//! and from then on every new journaled record is re-sent as soon as it
//! arrives.
//!
//! Replay state only ever escalates:
//!
//! ```text
//! Idle --replay(L)--> ReplayingAt(L)
//! ReplayingAt(L1) --replay(L2 > L1)--> ReplayingAt(L2)   (journal re-sent at L2)
//! ReplayingAt(L1) --replay(L2 <= L1)--> ReplayingAt(L1)  (nothing sent)
//! any --reset()--> Idle                                  (journal cleared)
//! ```

use crate::config::ReplayConfig;
use crate::exit::{Exiter, ProcessExiter};
use crate::journal::{Journal, JournalStats, JournaledMessage};
use replog_core::{
    Attrs, Clock, Level, LevelSet, Result, Sink, SystemClock, Timestamp, Value,
};

/// Attribute added to every replayed record
///
/// Its value is a `Value::Level` holding the level the record was originally
/// logged at, so downstream consumers can tell replays from fresh records.
pub const REPLAYED_FROM_LEVEL: &str = "replayed-from-level";

/// Replay state of a journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// No replay requested yet
    Idle,
    /// Journaled records are re-sent at this level
    ReplayingAt(Level),
}

/// Sink decorator that journals records and replays them on demand
///
/// # Example
///
/// ```
/// use replog_core::{Level, LevelLogger, Value};
/// use replog_journal::{ReplayJournal, REPLAYED_FROM_LEVEL};
/// use replog_sinks::MemorySink;
///
/// let mut journal = ReplayJournal::new(MemorySink::new(), [Level::Debug]);
/// journal.debug("connecting")?;
/// journal.error("connection refused")?;
/// journal.replay(Level::Error)?;
///
/// let records = journal.sink().records();
/// assert_eq!(records.len(), 3);
/// assert_eq!(records[2].level, Level::Error);
/// assert_eq!(records[2].msg, "connecting");
/// assert_eq!(
///     records[2].attr(REPLAYED_FROM_LEVEL),
///     Some(&Value::Level(Level::Debug))
/// );
/// # Ok::<(), replog_core::Error>(())
/// ```
pub struct ReplayJournal<S, C = SystemClock> {
    sink: S,
    clock: C,
    exiter: Box<dyn Exiter>,
    journaled_levels: LevelSet,
    journal: Journal,
    replaying_at: Option<Level>,
}

impl<S: Sink> ReplayJournal<S> {
    /// Wrap `sink`, journaling records at any of `levels`
    pub fn new(sink: S, levels: impl IntoIterator<Item = Level>) -> Self {
        Self::with_clock(sink, SystemClock, levels)
    }

    /// Wrap `sink` using the levels named in `config`
    pub fn from_config(sink: S, config: &ReplayConfig) -> Self {
        Self::new(sink, config.level_set().iter())
    }
}

impl<S: Sink, C: Clock> ReplayJournal<S, C> {
    /// Wrap `sink`, reading the current time from `clock`
    pub fn with_clock(sink: S, clock: C, levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            sink,
            clock,
            exiter: Box::new(ProcessExiter),
            journaled_levels: levels.into_iter().collect(),
            journal: Journal::new(),
            replaying_at: None,
        }
    }

    /// Replace the process-exit hook used by the `die` family
    pub fn with_exiter(mut self, exiter: impl Exiter + 'static) -> Self {
        self.exiter = Box::new(exiter);
        self
    }

    /// Log a record stamped with the current clock time
    pub fn log(
        &mut self,
        level: Level,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        let now = self.clock.now();
        self.log_with_time(level, now, attrs, msg, args)
    }

    /// Log a record that happened at `ts`
    ///
    /// The record always reaches the sink first. If the sink rejects it,
    /// nothing is journaled. Otherwise a record at a journaled level is
    /// appended to the journal, and re-sent at the active replay level if a
    /// replay is in progress. The record is journaled even when that re-send
    /// fails; the re-send error is still returned.
    pub fn log_with_time(
        &mut self,
        level: Level,
        ts: Timestamp,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        self.sink.log_with_time(level, ts, attrs, msg, args)?;

        if !self.is_journaled(level) {
            return Ok(());
        }

        let message = JournaledMessage::new(level, ts, attrs.cloned(), msg, args.to_vec());
        let replayed = match self.replaying_at {
            Some(active) => replay_message(&mut self.sink, active, &message),
            None => Ok(()),
        };
        self.journal.record(message);

        replayed
    }

    /// Re-send the journal at `level`
    ///
    /// Does nothing if a replay is already active at `level` or a more urgent
    /// one. Otherwise `level` becomes the active replay level and every
    /// journaled record is re-sent, oldest first. The first sink error stops
    /// the walk; records already re-sent stay sent, and the next call starts
    /// again from the oldest record.
    pub fn replay(&mut self, level: Level) -> Result<()> {
        if let Some(active) = self.replaying_at {
            if active >= level {
                tracing::trace!(
                    active = %active,
                    requested = %level,
                    "replay not escalated, already replaying at this level or above"
                );
                return Ok(());
            }
        }

        tracing::debug!(
            from = ?self.replaying_at,
            to = %level,
            entries = self.journal.len(),
            "replaying journal"
        );
        self.replaying_at = Some(level);

        for message in &self.journal {
            replay_message(&mut self.sink, level, message)?;
        }

        Ok(())
    }

    /// Shut down the wrapped sink
    pub fn shutdown_loggers(&mut self) -> Result<()> {
        self.sink.shutdown_loggers()
    }

    /// Forget every journaled record and stop replaying
    ///
    /// The set of journaled levels is kept. Mostly useful in tests.
    pub fn reset(&mut self) {
        self.journal.clear();
        self.replaying_at = None;
    }

    /// Check if records at `level` are journaled
    pub fn is_journaled(&self, level: Level) -> bool {
        self.journaled_levels.contains(level)
    }

    /// The levels this journal records
    pub fn journaled_levels(&self) -> LevelSet {
        self.journaled_levels
    }

    /// Journaled records, oldest first
    pub fn journal(&self) -> &[JournaledMessage] {
        self.journal.entries()
    }

    /// Number of journaled records
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    /// Check if nothing has been journaled
    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    /// Level replay is active at, if any
    pub fn replaying_at(&self) -> Option<Level> {
        self.replaying_at
    }

    /// Current replay state
    pub fn replay_state(&self) -> ReplayState {
        match self.replaying_at {
            Some(level) => ReplayState::ReplayingAt(level),
            None => ReplayState::Idle,
        }
    }

    /// Get statistics about the journal
    pub fn stats(&self) -> JournalStats {
        JournalStats {
            replaying_at: self.replaying_at,
            ..self.journal.stats()
        }
    }

    /// The wrapped sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The wrapped sink, mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Unwrap the sink, discarding the journal
    pub fn into_sink(self) -> S {
        self.sink
    }

    pub(crate) fn exiter(&self) -> &dyn Exiter {
        self.exiter.as_ref()
    }
}

impl<S: Sink, C: Clock> Sink for ReplayJournal<S, C> {
    fn log(
        &mut self,
        level: Level,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        ReplayJournal::log(self, level, attrs, msg, args)
    }

    fn log_with_time(
        &mut self,
        level: Level,
        ts: Timestamp,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        ReplayJournal::log_with_time(self, level, ts, attrs, msg, args)
    }

    fn shutdown_loggers(&mut self) -> Result<()> {
        ReplayJournal::shutdown_loggers(self)
    }
}

/// Attributes for a replayed copy of `message`
///
/// Always a fresh bag: the stored attributes are cloned (or started empty)
/// and tagged with the original level.
pub fn replay_attrs(message: &JournaledMessage) -> Attrs {
    let mut attrs = message.attrs().cloned().unwrap_or_default();
    attrs.set(REPLAYED_FROM_LEVEL, message.level());
    attrs
}

fn replay_message<S: Sink>(sink: &mut S, level: Level, message: &JournaledMessage) -> Result<()> {
    sink.log_with_time(
        level,
        message.timestamp(),
        Some(&replay_attrs(message)),
        message.msg(),
        message.args(),
    )
}
