//! Per-level shorthands for any sink
//!
//! Every level gets the same trio:
//! - `<level>(msg)` - plain message
//! - `<level>f(msg, args)` - message template with positional arguments
//! - `<level>m(attrs, msg, args)` - template, arguments and attributes
//!
//! plus the short aliases `dbg*`, `warn*` and `err*`. The methods are
//! generated from one table so they cannot drift apart.

use crate::error::Result;
use crate::level::Level;
use crate::sink::Sink;
use crate::value::{Attrs, Value};

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $fmt:ident, $attrs:ident;)*) => {
        $(
            #[doc = concat!("Log `msg` at `Level::", stringify!($level), "`")]
            fn $plain(&mut self, msg: &str) -> Result<()> {
                self.log(Level::$level, None, msg, &[])
            }

            #[doc = concat!("Log a template with arguments at `Level::", stringify!($level), "`")]
            fn $fmt(&mut self, msg: &str, args: &[Value]) -> Result<()> {
                self.log(Level::$level, None, msg, args)
            }

            #[doc = concat!("Log a template with attributes and arguments at `Level::", stringify!($level), "`")]
            fn $attrs(&mut self, attrs: &Attrs, msg: &str, args: &[Value]) -> Result<()> {
                self.log(Level::$level, Some(attrs), msg, args)
            }
        )*
    };
}

/// Level-named logging methods, available on every [`Sink`]
///
/// # Example
///
/// ```
/// use replog_core::{Attrs, Level, LevelLogger, Sink, Value};
/// # use replog_core::{Result, Timestamp};
/// # #[derive(Default)]
/// # struct Count(usize);
/// # impl Sink for Count {
/// #     fn log(&mut self, _: Level, _: Option<&Attrs>, _: &str, _: &[Value]) -> Result<()> {
/// #         self.0 += 1;
/// #         Ok(())
/// #     }
/// #     fn log_with_time(&mut self, _: Level, _: Timestamp, _: Option<&Attrs>, _: &str, _: &[Value]) -> Result<()> {
/// #         self.0 += 1;
/// #         Ok(())
/// #     }
/// #     fn shutdown_loggers(&mut self) -> Result<()> { Ok(()) }
/// # }
///
/// let mut sink = Count::default();
/// sink.info("starting")?;
/// sink.warnf("retry {}", &[Value::Int(3)])?;
/// # assert_eq!(sink.0, 2);
/// # Ok::<(), replog_core::Error>(())
/// ```
pub trait LevelLogger: Sink {
    level_methods! {
        Debug => debug, debugf, debugm;
        Debug => dbg, dbgf, dbgm;
        Info => info, infof, infom;
        Warning => warning, warningf, warningm;
        Warning => warn, warnf, warnm;
        Error => error, errorf, errorm;
        Error => err, errf, errm;
        Fatal => fatal, fatalf, fatalm;
    }
}

impl<S: Sink + ?Sized> LevelLogger for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Record;
    use crate::time::Timestamp;

    #[derive(Default)]
    struct Capture {
        records: Vec<Record>,
    }

    impl Sink for Capture {
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
            self.records
                .push(Record::capture(level, Some(ts), attrs, msg, args));
            Ok(())
        }

        fn shutdown_loggers(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_shorthand_hits_its_level() {
        let mut sink = Capture::default();
        let attrs = Attrs::new().with_attr("attr1", 4321);
        let args = [Value::Int(1234)];

        sink.dbg("test").unwrap();
        sink.debugf("test %d", &args).unwrap();
        sink.infom(&attrs, "test %d", &args).unwrap();
        sink.warn("test").unwrap();
        sink.warningf("test %d", &args).unwrap();
        sink.err("test").unwrap();
        sink.errorm(&attrs, "test %d", &args).unwrap();
        sink.fatal("test").unwrap();

        let levels: Vec<Level> = sink.records.iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                Level::Debug,
                Level::Debug,
                Level::Info,
                Level::Warning,
                Level::Warning,
                Level::Error,
                Level::Error,
                Level::Fatal,
            ]
        );
    }

    #[test]
    fn test_shorthand_forwards_attrs_and_args() {
        let mut sink = Capture::default();
        let attrs = Attrs::new().with_attr("attr1", 4321);

        sink.fatalm(&attrs, "test %d", &[Value::Int(1234)]).unwrap();
        sink.info("plain").unwrap();

        let record = &sink.records[0];
        assert_eq!(record.msg, "test %d");
        assert_eq!(record.args, vec![Value::Int(1234)]);
        assert_eq!(record.attr("attr1"), Some(&Value::Int(4321)));
        assert!(record.timestamp.is_none());

        let plain = &sink.records[1];
        assert!(plain.attrs.is_none());
        assert!(plain.args.is_empty());
    }
}
