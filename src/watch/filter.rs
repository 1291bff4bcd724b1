// src/watch/filter.rs

//! Relevance decision for raw watch events.

use tracing::debug;

use crate::types::{Operation, WatchEvent};
use crate::watch::patterns::ExcludeList;

/// Decide whether `event` should trigger a run.
///
/// Rejects events whose operation shares no flag with `mask`, then events
/// whose path is excluded. Pure apart from debug logging.
pub fn should_handle(event: &WatchEvent, mask: Operation, excludes: &ExcludeList) -> bool {
    if (event.operation & mask).is_empty() {
        debug!(
            "Skipping excluded event: {} ({})",
            event.operation,
            event.operation & mask
        );
        return false;
    }

    if excludes.is_match(&event.path) {
        debug!("Skipping excluded file: {}", event.path.display());
        return false;
    }

    true
}

/// Operation mask and exclude list bundled for the supervisor.
#[derive(Debug, Clone)]
pub struct EventFilter {
    mask: Operation,
    excludes: ExcludeList,
}

impl EventFilter {
    pub fn new(mask: Operation, excludes: ExcludeList) -> Self {
        Self { mask, excludes }
    }

    pub fn mask(&self) -> Operation {
        self.mask
    }

    pub fn excludes(&self) -> &ExcludeList {
        &self.excludes
    }

    pub fn should_handle(&self, event: &WatchEvent) -> bool {
        should_handle(event, self.mask, &self.excludes)
    }
}
