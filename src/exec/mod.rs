// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] defines the `CommandExecutor` trait and the `Invocation`
//!   it executes.
//! - [`process`] runs invocations as child processes via
//!   `tokio::process::Command`.
//! - [`report`] formats the start/end lines shown for every run.

pub mod backend;
pub mod process;
pub mod report;

pub use backend::{
    CommandExecutor, ENV_TEST_DIRECTORY, ENV_TEST_FILENAME, Invocation, RunOutcome,
};
pub use process::ProcessExecutor;
