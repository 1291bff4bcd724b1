// src/command/mod.rs

//! Command construction for a changed file.
//!
//! - [`template`] holds the program prefix and placeholder expansion.
//! - [`builder`] narrows the command using what the source scanner found.

pub mod builder;
pub mod template;

pub use builder::{CommandBuilder, RUN_FLAG, TAGS_FLAG, test_pattern};
pub use template::{CommandTemplate, Placeholders};
