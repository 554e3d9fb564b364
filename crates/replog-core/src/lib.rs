//! Replog Core - Levels, attributes, clocks and the sink contract
//!
//! This crate provides the building blocks shared by every replog crate:
//! - Ordered severities (`Level`, `LevelSet`)
//! - Dynamic attribute values (`Value`, `Attrs`)
//! - Time sources (`Clock`, `SystemClock`, `ManualClock`)
//! - The downstream logger contract (`Sink`) and per-level shorthands (`LevelLogger`)

mod convenience;
mod error;
mod level;
mod sink;
pub mod time;
mod value;

pub use convenience::LevelLogger;
pub use error::{Error, Result};
pub use level::{Level, LevelSet};
pub use sink::{Record, Sink};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
pub use value::{Attrs, Value};
