// src/watch/source.rs

//! The event source consumed by the supervisor.
//!
//! An [`EventSource`] owns two streams (events and errors) plus the backend
//! that produces them. The backend is released when the source is dropped,
//! so whichever way the watch loop exits, the OS watch handles go with it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::Result;
use crate::types::WatchEvent;

/// Error reported on the source's error stream.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The backend hit a problem but keeps delivering events.
    #[error("watch backend error: {0}")]
    Backend(#[from] notify::Error),

    /// The source can no longer deliver events.
    #[error("event source terminated: {0}")]
    Terminated(String),
}

impl SourceError {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SourceError::Terminated(_))
    }
}

/// What a single receive on the source produced.
#[derive(Debug)]
pub enum SourceMessage {
    Event(WatchEvent),
    Error(SourceError),
    /// Both streams have closed.
    Closed,
}

/// Something that can add directories to an OS-level watch.
///
/// Dropping the backend releases every watch it holds.
pub trait WatchBackend: Send {
    fn add(&mut self, dir: &Path) -> Result<()>;
}

pub struct EventSource {
    events: mpsc::UnboundedReceiver<WatchEvent>,
    errors: mpsc::UnboundedReceiver<SourceError>,
    backend: Box<dyn WatchBackend>,
}

impl fmt::Debug for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource").finish_non_exhaustive()
    }
}

impl EventSource {
    pub fn new(
        events: mpsc::UnboundedReceiver<WatchEvent>,
        errors: mpsc::UnboundedReceiver<SourceError>,
        backend: Box<dyn WatchBackend>,
    ) -> Self {
        Self {
            events,
            errors,
            backend,
        }
    }

    /// A source fed by hand through the returned [`SourceFeed`].
    ///
    /// Used by tests and by embedders that have their own change feed.
    pub fn channel() -> (Self, SourceFeed) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (error_tx, error_rx) = mpsc::unbounded_channel();
        let watched = Arc::new(Mutex::new(Vec::new()));
        let backend = ManualBackend {
            watched: Arc::clone(&watched),
        };
        let feed = SourceFeed {
            events: event_tx,
            errors: error_tx,
            watched,
        };
        (Self::new(event_rx, error_rx, Box::new(backend)), feed)
    }

    /// Start watching `dir` (non-recursively).
    pub fn add(&mut self, dir: &Path) -> Result<()> {
        debug!("Adding new watch: {}", dir.display());
        self.backend.add(dir)
    }

    /// Wait for the next event or error, whichever comes first.
    ///
    /// Cancel-safe: nothing is lost if the future is dropped.
    pub async fn recv(&mut self) -> SourceMessage {
        tokio::select! {
            Some(event) = self.events.recv() => SourceMessage::Event(event),
            Some(err) = self.errors.recv() => SourceMessage::Error(err),
            else => SourceMessage::Closed,
        }
    }
}

impl Drop for EventSource {
    fn drop(&mut self) {
        debug!("releasing event source");
    }
}

/// Sending half of [`EventSource::channel`].
#[derive(Debug, Clone)]
pub struct SourceFeed {
    events: mpsc::UnboundedSender<WatchEvent>,
    errors: mpsc::UnboundedSender<SourceError>,
    watched: Arc<Mutex<Vec<PathBuf>>>,
}

impl SourceFeed {
    /// Deliver an event. Returns false once the source is gone.
    pub fn send_event(&self, event: WatchEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Deliver an error. Returns false once the source is gone.
    pub fn send_error(&self, err: SourceError) -> bool {
        self.errors.send(err).is_ok()
    }

    /// Directories added to the source so far.
    pub fn watched(&self) -> Vec<PathBuf> {
        self.watched
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    /// Whether the source side has been dropped.
    pub fn is_released(&self) -> bool {
        self.events.is_closed()
    }
}

struct ManualBackend {
    watched: Arc<Mutex<Vec<PathBuf>>>,
}

impl WatchBackend for ManualBackend {
    fn add(&mut self, dir: &Path) -> Result<()> {
        if let Ok(mut watched) = self.watched.lock() {
            watched.push(dir.to_path_buf());
        }
        Ok(())
    }
}
