//! Process-exit helpers
//!
//! The `die` family logs a fatal record, shuts the sink down and then ends the
//! process through an [`Exiter`]. The exiter belongs to the journal rather
//! than to the process, so tests can swap it for one that just records the
//! exit code.

use crate::replayer::ReplayJournal;
use replog_core::{Attrs, Clock, Level, Sink, Value};

/// Ends the process
pub trait Exiter {
    /// Exit with `code`
    fn exit(&self, code: i32);
}

/// Exiter that terminates the real process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExiter;

impl Exiter for ProcessExiter {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

impl<F: Fn(i32)> Exiter for F {
    fn exit(&self, code: i32) {
        self(code)
    }
}

impl<S: Sink, C: Clock> ReplayJournal<S, C> {
    /// Log `msg` at fatal, shut the sink down and exit with `code`
    ///
    /// The record goes through the journal like any other, so it is journaled
    /// when fatal is one of the journaled levels.
    pub fn die(&mut self, code: i32, msg: &str) {
        self.die_with(code, None, msg, &[]);
    }

    /// Like [`die`](Self::die), with formatting arguments
    pub fn dief(&mut self, code: i32, msg: &str, args: &[Value]) {
        self.die_with(code, None, msg, args);
    }

    /// Like [`die`](Self::die), with attributes and formatting arguments
    pub fn diem(&mut self, code: i32, attrs: &Attrs, msg: &str, args: &[Value]) {
        self.die_with(code, Some(attrs), msg, args);
    }

    fn die_with(&mut self, code: i32, attrs: Option<&Attrs>, msg: &str, args: &[Value]) {
        // Exiting regardless; failures can only be reported.
        if let Err(err) = self.log(Level::Fatal, attrs, msg, args) {
            tracing::warn!(error = %err, code, "failed to log fatal record before exit");
        }
        if let Err(err) = self.shutdown_loggers() {
            tracing::warn!(error = %err, code, "failed to shut down sink before exit");
        }
        self.exiter().exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replog_core::{Error, Record, Result, Timestamp};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Shared event log so ordering across sink and exiter can be checked
    type Events = Rc<RefCell<Vec<String>>>;

    struct EventSink {
        events: Events,
        records: Vec<Record>,
        fail_logs: bool,
    }

    impl EventSink {
        fn new(events: &Events) -> Self {
            Self {
                events: Rc::clone(events),
                records: Vec::new(),
                fail_logs: false,
            }
        }
    }

    impl Sink for EventSink {
        fn log(
            &mut self,
            level: Level,
            attrs: Option<&Attrs>,
            msg: &str,
            args: &[Value],
        ) -> Result<()> {
            self.records.push(Record::capture(level, None, attrs, msg, args));
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
            if self.fail_logs {
                return Err(Error::sink("disk full"));
            }
            self.events.borrow_mut().push(format!("log {}", level));
            self.records
                .push(Record::capture(level, Some(ts), attrs, msg, args));
            Ok(())
        }

        fn shutdown_loggers(&mut self) -> Result<()> {
            self.events.borrow_mut().push("shutdown".to_string());
            Ok(())
        }
    }

    fn recording_exiter(events: &Events) -> impl Fn(i32) + 'static {
        let events = Rc::clone(events);
        move |code| events.borrow_mut().push(format!("exit {}", code))
    }

    #[test]
    fn test_die_logs_shuts_down_then_exits() {
        let events = Events::default();
        let mut journal = ReplayJournal::new(EventSink::new(&events), [Level::Debug])
            .with_exiter(recording_exiter(&events));

        journal.die(1234, "test");

        assert_eq!(
            *events.borrow(),
            vec!["log fatal", "shutdown", "exit 1234"]
        );
        assert_eq!(journal.sink().records[0].msg, "test");
    }

    #[test]
    fn test_dief_forwards_args() {
        let events = Events::default();
        let mut journal = ReplayJournal::new(EventSink::new(&events), [Level::Debug])
            .with_exiter(recording_exiter(&events));

        journal.dief(1234, "test %d", &[Value::Int(1234)]);

        let record = &journal.sink().records[0];
        assert_eq!(record.level, Level::Fatal);
        assert_eq!(record.args, vec![Value::Int(1234)]);
        assert_eq!(events.borrow().last().map(String::as_str), Some("exit 1234"));
    }

    #[test]
    fn test_diem_forwards_attrs() {
        let events = Events::default();
        let mut journal = ReplayJournal::new(EventSink::new(&events), [Level::Debug])
            .with_exiter(recording_exiter(&events));
        let attrs = Attrs::new().with_attr("attr1", 4321);

        journal.diem(1234, &attrs, "test %d", &[Value::Int(1234)]);

        let record = &journal.sink().records[0];
        assert_eq!(record.attr("attr1"), Some(&Value::Int(4321)));
        assert_eq!(events.borrow().len(), 3);
    }

    #[test]
    fn test_die_exits_even_when_logging_fails() {
        let events = Events::default();
        let mut sink = EventSink::new(&events);
        sink.fail_logs = true;
        let mut journal =
            ReplayJournal::new(sink, [Level::Fatal]).with_exiter(recording_exiter(&events));

        journal.die(3, "unlogged");

        assert_eq!(*events.borrow(), vec!["shutdown", "exit 3"]);
        assert!(journal.is_empty());
    }

    #[test]
    fn test_die_journals_fatal_when_journaled() {
        let code = Rc::new(Cell::new(None));
        let seen = Rc::clone(&code);
        let events = Events::default();
        let mut journal = ReplayJournal::new(EventSink::new(&events), [Level::Fatal])
            .with_exiter(move |c| seen.set(Some(c)));

        journal.die(2, "bye");

        assert_eq!(code.get(), Some(2));
        assert_eq!(journal.len(), 1);
        assert_eq!(journal.journal()[0].level(), Level::Fatal);
    }

    #[test]
    fn test_die_resends_fatal_while_replaying() {
        let events = Events::default();
        let mut journal = ReplayJournal::new(EventSink::new(&events), [Level::Fatal])
            .with_exiter(recording_exiter(&events));
        journal.replay(Level::Warning).unwrap();

        journal.die(1, "foo");

        assert_eq!(
            *events.borrow(),
            vec!["log fatal", "log warning", "shutdown", "exit 1"]
        );
        let sent: Vec<_> = journal
            .sink()
            .records
            .iter()
            .map(|r| (r.level, r.msg.as_str()))
            .collect();
        assert_eq!(sent, vec![(Level::Fatal, "foo"), (Level::Warning, "foo")]);
        assert_eq!(journal.len(), 1);
    }
}
