// src/logging.rs

//! Logging setup for `ram` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `-v/--verbose` (debug) or `-q/--quiet` (warn)
//! 3. `RAM_LOG` environment variable (any `EnvFilter` directive)
//! 4. default to `info`
//!
//! Logs are sent to STDERR so that stdout carries only the test command's
//! output and the run report.

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{CliArgs, LogLevel};

/// Name of the environment variable consulted when no flag sets a level.
pub const LOG_ENV_VAR: &str = "RAM_LOG";

/// Process-wide logging configuration, resolved once from the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSettings {
    /// Level requested explicitly on the command line, if any.
    pub level: Option<Level>,
}

impl LogSettings {
    pub fn from_cli(args: &CliArgs) -> Self {
        let level = match (args.log_level, args.verbose, args.quiet) {
            (Some(lvl), _, _) => Some(level_from_log_level(lvl)),
            (None, true, _) => Some(Level::DEBUG),
            (None, false, true) => Some(Level::WARN),
            (None, false, false) => None,
        };
        Self { level }
    }

    /// Build the filter this configuration stands for.
    pub fn filter(&self) -> EnvFilter {
        match self.level {
            Some(level) => EnvFilter::new(level.as_str().to_lowercase()),
            None => EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }
}

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    fmt()
        .with_env_filter(settings.filter())
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("initialising logging: {e}"))
}

fn level_from_log_level(lvl: LogLevel) -> Level {
    match lvl {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}
