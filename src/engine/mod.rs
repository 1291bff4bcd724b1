// src/engine/mod.rs

//! Orchestration engine for ram.
//!
//! Two loops run side by side:
//! - the [`supervisor`] pulls events from the source, filters them and
//!   enforces the idle timeout,
//! - the [`runner`] builds and executes one command at a time, dropping
//!   events that arrive while it is busy.
//!
//! They share nothing but the runner's handoff channel, its ready flag and a
//! cancellation token.

pub mod runner;
pub mod supervisor;

pub use runner::{INBOX_CAPACITY, RunLoop, Runner, Submission};
pub use supervisor::{WatchOptions, watch};
