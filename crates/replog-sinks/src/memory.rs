//! In-memory sink

use replog_core::{Attrs, Error, Level, Record, Result, Sink, Timestamp, Value};

/// Sink that keeps every record it receives
///
/// Once shut down it rejects further records with [`Error::Closed`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<Record>,
    shut_down: bool,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records received so far, in arrival order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Take every record received so far, leaving the sink empty
    pub fn take(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.records)
    }

    /// Records received at `level`
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.level == level)
    }

    /// Check if `shutdown_loggers` has been called
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn push(&mut self, record: Record) -> Result<()> {
        if self.shut_down {
            return Err(Error::Closed);
        }
        self.records.push(record);
        Ok(())
    }
}

impl Sink for MemorySink {
    fn log(
        &mut self,
        level: Level,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        self.push(Record::capture(level, None, attrs, msg, args))
    }

    fn log_with_time(
        &mut self,
        level: Level,
        ts: Timestamp,
        attrs: Option<&Attrs>,
        msg: &str,
        args: &[Value],
    ) -> Result<()> {
        self.push(Record::capture(level, Some(ts), attrs, msg, args))
    }

    fn shutdown_loggers(&mut self) -> Result<()> {
        self.shut_down = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replog_core::time::unix;
    use replog_core::LevelLogger;

    #[test]
    fn test_memory_sink_captures_records() {
        let mut sink = MemorySink::new();
        sink.info("plain").unwrap();
        sink.log_with_time(Level::Error, unix(5, 0), None, "timed", &[Value::Int(1)])
            .unwrap();

        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.records()[0].timestamp, None);
        assert_eq!(sink.records()[1].timestamp, Some(unix(5, 0)));
        assert_eq!(sink.at_level(Level::Error).count(), 1);
    }

    #[test]
    fn test_memory_sink_rejects_after_shutdown() {
        let mut sink = MemorySink::new();
        sink.shutdown_loggers().unwrap();

        assert!(sink.is_shut_down());
        assert!(matches!(sink.info("late"), Err(Error::Closed)));
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_take_drains_records() {
        let mut sink = MemorySink::new();
        sink.dbg("a").unwrap();
        sink.dbg("b").unwrap();

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.records().is_empty());
    }
}
