// src/config/settings.rs

//! Effective settings: CLI flags layered over the config file layered over
//! the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::errors::{RamError, Result};
use crate::logging::LogSettings;
use crate::types::Operation;

pub const DEFAULT_DEPTH: usize = 5;
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_PROGRAM: [&str; 2] = ["go", "test"];
pub const DEFAULT_TARGET: &str = "./${dir}";

/// Everything the watch loop needs, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub directories: Vec<PathBuf>,
    pub depth: usize,
    /// User exclude patterns; the built-in defaults are added when the
    /// exclude list is compiled.
    pub exclude: Vec<String>,
    pub events: Operation,
    pub idle_timeout: Duration,
    /// Program and fixed leading arguments.
    pub program: Vec<String>,
    /// Argument template, placeholders still unexpanded.
    pub args: Vec<String>,
    pub log: LogSettings,
}

impl Settings {
    /// Merge CLI arguments with an optional, already validated config file.
    pub fn resolve(args: &CliArgs, file: Option<ConfigFile>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let directories = if !args.directories.is_empty() {
            args.directories.clone()
        } else {
            file.watch
                .directories
                .unwrap_or_else(|| vec![PathBuf::from(".")])
        };

        let depth = args.depth.or(file.watch.depth).unwrap_or(DEFAULT_DEPTH);

        let mut exclude = file.watch.exclude;
        exclude.extend(args.exclude.iter().cloned());

        let events = if args.events.is_empty() {
            file.watch.events.unwrap_or(Operation::DEFAULT_MASK)
        } else {
            args.events
                .iter()
                .fold(Operation::empty(), |mask, ev| mask | Operation::from(*ev))
        };

        let idle_timeout = args
            .idle_timeout
            .or(file.watch.idle_timeout)
            .unwrap_or(DEFAULT_IDLE_TIMEOUT);
        if idle_timeout.is_zero() {
            return Err(RamError::ConfigError(
                "idle timeout must be greater than zero".to_string(),
            ));
        }

        let program = file
            .command
            .program
            .unwrap_or_else(|| DEFAULT_PROGRAM.iter().map(|s| s.to_string()).collect());

        let user_args = if args.command.is_empty() {
            file.command.args
        } else {
            args.command.clone()
        };
        let target = file
            .command
            .target
            .unwrap_or_else(|| DEFAULT_TARGET.to_string());

        Ok(Self {
            directories,
            depth,
            exclude,
            events,
            idle_timeout,
            program,
            args: clean_command(user_args, target),
            log: LogSettings::from_cli(args),
        })
    }
}

/// Drop literal `--` separators and append the package target.
fn clean_command(args: Vec<String>, target: String) -> Vec<String> {
    let mut cleaned: Vec<String> = args.into_iter().filter(|a| a != "--").collect();
    if !target.is_empty() {
        cleaned.push(target);
    }
    cleaned
}
