// src/config/validate.rs

use crate::config::duration::parse_duration;
use crate::config::model::{
    CommandConfig, ConfigFile, RawCommandSection, RawConfigFile, RawWatchSection, WatchConfig,
};
use crate::errors::{RamError, Result};
use crate::types::Operation;
use crate::watch::patterns::ExcludeList;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RamError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        Ok(ConfigFile {
            watch: validate_watch(raw.watch)?,
            command: validate_command(raw.command)?,
        })
    }
}

fn validate_watch(raw: RawWatchSection) -> Result<WatchConfig> {
    if let Some(dirs) = &raw.directories {
        if dirs.is_empty() {
            return Err(RamError::ConfigError(
                "[watch].directories must list at least one directory".to_string(),
            ));
        }
    }

    let events = if raw.events.is_empty() {
        None
    } else {
        Some(Operation::mask_from_names(&raw.events).map_err(|e| {
            RamError::ConfigError(format!("invalid [watch].events: {e}"))
        })?)
    };

    let idle_timeout = raw
        .idle_timeout
        .as_deref()
        .map(parse_duration)
        .transpose()
        .map_err(|e| RamError::ConfigError(format!("invalid [watch].idle_timeout: {e}")))?;

    // Compile once so a bad glob is reported at load time, with the file's
    // patterns rather than the merged list.
    ExcludeList::new(&raw.exclude)?;

    Ok(WatchConfig {
        directories: raw.directories,
        depth: raw.depth,
        exclude: raw.exclude,
        events,
        idle_timeout,
    })
}

fn validate_command(raw: RawCommandSection) -> Result<CommandConfig> {
    if let Some(program) = &raw.program {
        if program.first().is_none_or(|p| p.trim().is_empty()) {
            return Err(RamError::ConfigError(
                "[command].program must name a program to run".to_string(),
            ));
        }
    }

    Ok(CommandConfig {
        program: raw.program,
        args: raw.args,
        target: raw.target,
    })
}
