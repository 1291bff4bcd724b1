// src/config/mod.rs

//! Configuration for ram.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate it into typed values (`validate.rs`).
//! - Merge it with CLI flags and defaults (`settings.rs`).

pub mod duration;
pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{discover, load_and_validate, load_from_path};
pub use model::{CommandConfig, ConfigFile, RawConfigFile, WatchConfig};
pub use settings::Settings;
