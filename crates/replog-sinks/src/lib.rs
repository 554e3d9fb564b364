//! Replog Sinks - Ready-made destinations for replog records
//!
//! - `TracingSink` - forwards records to the active `tracing` subscriber
//! - `MemorySink` - keeps records in memory for inspection

mod memory;
mod tracing_sink;

pub use memory::MemorySink;
pub use tracing_sink::{TracingSink, TARGET};
