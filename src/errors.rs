// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::watch::source::SourceError;

#[derive(Error, Debug)]
pub enum RamError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid exclude pattern: {0}")]
    PatternError(#[from] globset::Error),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error("Event source failed: {0}")]
    SourceFailed(#[from] SourceError),

    #[error("Event source closed")]
    SourceClosed,

    #[error("failed to spawn `{program}`: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RamError>;
