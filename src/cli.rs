// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every option is optional here so that [`crate::config::Settings`] can tell
//! an explicit flag apart from a value that should come from the config file
//! or the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::duration::parse_duration;
use crate::types::Operation;

/// Command-line arguments for `ram`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "ram",
    version,
    about = "Watch Go sources and re-run the tests for whatever file just changed.",
    override_usage = "ram [OPTIONS] [COMMAND ARGS...]",
    long_about = None
)]
pub struct CliArgs {
    /// Verbose output (debug logging).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (warnings and errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Exclude file patterns (glob), added to the built-in defaults.
    #[arg(short = 'x', long, value_name = "PATTERN", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Directories to watch. Default: `.`
    #[arg(short = 'd', long = "directory", value_name = "DIR")]
    pub directories: Vec<PathBuf>,

    /// Descend only this many directory levels deep. Default: 5
    #[arg(short = 'L', long, value_name = "N")]
    pub depth: Option<usize>,

    /// Exit after this long without a relevant change (e.g. `90s`, `10m`).
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub idle_timeout: Option<Duration>,

    /// Events to watch. Default: create,write
    #[arg(short = 'e', long = "event", value_enum, value_delimiter = ',')]
    pub events: Vec<EventArg>,

    /// Path to a TOML config file. Default: `.ram.toml` if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `-v`/`-q`, then `RAM_LOG`, then `info` are used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Extra arguments for the test command.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Filesystem operation as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EventArg {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
}

impl From<EventArg> for Operation {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::Create => Operation::CREATE,
            EventArg::Write => Operation::WRITE,
            EventArg::Remove => Operation::REMOVE,
            EventArg::Rename => Operation::RENAME,
            EventArg::Chmod => Operation::CHMOD,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
