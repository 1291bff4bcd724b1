// src/watch/mod.rs

//! File watching and change relevance.
//!
//! This module is responsible for:
//! - Compiling exclude glob patterns (`patterns`).
//! - Enumerating the directories to watch (`walk`).
//! - Deciding whether a raw event is worth a run (`filter`).
//! - Delivering events from a cross-platform watcher (`notify`) or from a
//!   hand-fed channel (`source`, `watcher`).
//!
//! It does **not** know how commands are built or run.

pub mod filter;
pub mod path_utils;
pub mod patterns;
pub mod source;
pub mod walk;
pub mod watcher;

pub use filter::{EventFilter, should_handle};
pub use patterns::{DEFAULT_EXCLUDES, ExcludeList};
pub use source::{EventSource, SourceError, SourceFeed, SourceMessage, WatchBackend};
pub use walk::walk_directories;
pub use watcher::build_event_source;
