//! Stderr logging for the CLI.
//!
//! Two targets are filtered independently: `advanceable` for the commands
//! themselves and `advanceable_cursor` for the cursor, which emits `trace`
//! events for rejected bounds checks, seeks and reads of unwritten bytes.
//! Stdout stays reserved for command output.

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

const CLI_TARGET: &str = "advanceable";
const CURSOR_TARGET: &str = "advanceable_cursor";

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Per-target filter: `level` for the commands, `cursor_level` for the cursor.
fn targets(level: LogLevel, cursor_level: LogLevel) -> Targets {
    Targets::new()
        .with_target(CLI_TARGET, level.as_filter())
        .with_target(CURSOR_TARGET, cursor_level.as_filter())
}

pub fn init_logging(format: LogFormat, level: LogLevel, cursor_level: LogLevel) {
    let filter = targets(level, cursor_level);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    let _ = match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(layer.with_filter(filter))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(layer.json().with_filter(filter))
            .try_init(),
    };
}
