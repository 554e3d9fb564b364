//! Time sources for log records
//!
//! - `Timestamp` - Wall-clock instant attached to every record
//! - `Clock` - Anything that can tell the current time
//! - `SystemClock` - The real clock
//! - `ManualClock` - A clock that only moves when told to (for tests and replays)

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// The instant a record was emitted
pub type Timestamp = DateTime<Utc>;

/// Source of the current time
pub trait Clock {
    /// Get the current time
    fn now(&self) -> Timestamp;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Clock that only advances when asked to
///
/// Uses interior mutability so a test can keep a shared reference while the
/// component under test owns another one.
///
/// # Example
///
/// ```
/// use replog_core::{Clock, ManualClock};
/// use chrono::Duration;
///
/// let clock = ManualClock::from_unix(24, 0);
/// clock.advance(Duration::seconds(3));
/// assert_eq!(clock.now().timestamp(), 27);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    /// Create a clock stopped at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Create a clock stopped at a Unix time
    ///
    /// Out-of-range inputs fall back to the Unix epoch.
    pub fn from_unix(secs: i64, nanos: u32) -> Self {
        Self::new(unix(secs, nanos))
    }

    /// Move the clock forward (or backward, for a negative duration)
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to a specific time
    pub fn set(&self, to: Timestamp) {
        self.now.set(to);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Build a timestamp from Unix seconds and nanoseconds
///
/// Out-of-range inputs fall back to the Unix epoch.
pub fn unix(secs: i64, nanos: u32) -> Timestamp {
    Utc.timestamp_opt(secs, nanos)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
