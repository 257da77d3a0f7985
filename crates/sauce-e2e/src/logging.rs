//! Logging setup.
//!
//! The library only emits `tracing` events. The CLI installs a subscriber
//! with [`init_logging`]; tests use [`init_test_logging`] so output lands in
//! the captured test stream. `RUST_LOG` overrides the chosen level.

use std::sync::Once;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Log level for suite output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging output
    Silent,
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Scenario progress (default)
    #[default]
    Info,
    /// Every lookup and action
    Debug,
}

impl LogLevel {
    /// Picks the level implied by the CLI's `--verbose`/`--quiet` flags;
    /// `verbose` wins.
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            LogLevel::Debug
        } else if quiet {
            LogLevel::Error
        } else {
            LogLevel::Info
        }
    }

    fn as_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Silent => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_level_filter())
    }
}

/// Installs the global subscriber at `level`.
///
/// Only the first call in a process takes effect.
pub fn init_logging(level: LogLevel, no_color: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(level.as_level_filter().into())
            .from_env_lossy();

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(!no_color),
            )
            .init();
    });
}

/// Routes logs through the test harness's captured output.
///
/// Safe to call from every test; later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
