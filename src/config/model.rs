// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::Operation;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// directories = ["."]
/// depth = 5
/// exclude = ["target/"]
/// events = ["create", "write"]
/// idle_timeout = "10m"
///
/// [command]
/// program = ["go", "test"]
/// args = ["-v"]
/// target = "./${dir}"
/// ```
///
/// All sections and keys are optional; anything left out falls back to the
/// CLI flag or the built-in default. This is the unvalidated form; convert
/// it with `ConfigFile::try_from`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: RawWatchSection,

    #[serde(default)]
    pub command: RawCommandSection,
}

/// `[watch]` section, as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawWatchSection {
    #[serde(default)]
    pub directories: Option<Vec<PathBuf>>,

    #[serde(default)]
    pub depth: Option<usize>,

    /// Extra exclude globs, appended to the built-in defaults.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Operation names (`create`, `write`, `remove`, `rename`, `chmod`).
    #[serde(default)]
    pub events: Vec<String>,

    /// Duration string, e.g. `"10m"`.
    #[serde(default)]
    pub idle_timeout: Option<String>,
}

/// `[command]` section, as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCommandSection {
    /// Program and fixed leading arguments, e.g. `["go", "test"]`.
    #[serde(default)]
    pub program: Option<Vec<String>>,

    /// Arguments placed after any build-tag flag.
    #[serde(default)]
    pub args: Vec<String>,

    /// Trailing package argument; defaults to `./${dir}`.
    #[serde(default)]
    pub target: Option<String>,
}

/// Validated configuration.
///
/// Construct via `ConfigFile::try_from(raw)` so that durations, event names
/// and glob patterns are known to be well-formed.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub watch: WatchConfig,
    pub command: CommandConfig,
}

#[derive(Debug, Clone, Default)]
pub struct WatchConfig {
    pub directories: Option<Vec<PathBuf>>,
    pub depth: Option<usize>,
    pub exclude: Vec<String>,
    pub events: Option<Operation>,
    pub idle_timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct CommandConfig {
    pub program: Option<Vec<String>>,
    pub args: Vec<String>,
    pub target: Option<String>,
}
