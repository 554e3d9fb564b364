//! Replay Demo
//!
//! Runs a small batch job with debug logging journaled in memory. The debug
//! records stay quiet under the default `info` filter until a step fails; the
//! journal is then replayed at the configured level so the context that led
//! up to the failure shows up in the output, tagged `replayed-from-level`.

use replog_core::{Attrs, Level, LevelLogger, Value};
use replog_journal::{ReplayConfig, ReplayJournal};
use replog_sinks::TracingSink;
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info";

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => ReplayConfig::load(&path)?,
        None => ReplayConfig::default(),
    };
    tracing::info!(
        journaled = ?config.journaled_levels,
        replay_level = %config.replay_level,
        "replay journal configured"
    );

    let mut log = ReplayJournal::from_config(TracingSink::new(), &config);

    log.info("job started")?;
    for (step, rows) in [("extract", 120), ("transform", 118), ("load", 0)] {
        let attrs = Attrs::new().with_attr("step", step);
        log.debugm(&attrs, "step produced %d rows", &[Value::Int(rows)])?;

        if rows == 0 {
            log.errorm(&attrs, "step produced no rows", &[])?;
            log.replay(config.replay_level)?;
            // Records logged from here on are re-sent at the replay level straight away.
            log.debug("aborting remaining steps")?;
            break;
        }
    }

    let stats = log.stats();
    tracing::info!(
        journaled = stats.total_entries,
        debug = stats.count(Level::Debug),
        replaying_at = ?stats.replaying_at,
        "job finished"
    );

    log.shutdown_loggers()?;
    Ok(())
}
