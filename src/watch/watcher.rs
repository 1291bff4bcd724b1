// src/watch/watcher.rs

//! `notify`-backed event source.

use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::info;

use crate::errors::Result;
use crate::types::{Operation, WatchEvent};
use crate::watch::path_utils::relative_to;
use crate::watch::source::{EventSource, SourceError, WatchBackend};

/// Keeps the `RecommendedWatcher` alive; dropping it stops all watches.
struct NotifyBackend {
    watcher: RecommendedWatcher,
}

impl WatchBackend for NotifyBackend {
    fn add(&mut self, dir: &Path) -> Result<()> {
        self.watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(())
    }
}

impl EventSource {
    /// Create a source backed by the platform's native watcher.
    ///
    /// No directory is watched yet; call [`EventSource::add`] for each one.
    /// Event paths under the current working directory are reported
    /// relative to it.
    pub fn notify() -> Result<EventSource> {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let (event_tx, event_rx) = mpsc::unbounded_channel::<WatchEvent>();
        let (error_tx, error_rx) = mpsc::unbounded_channel::<SourceError>();

        // Called synchronously on notify's own thread.
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let operation = operation_for(&event.kind);
                    for path in event.paths {
                        let path = relative_to(&root, &path);
                        // The receiver only goes away on shutdown.
                        let _ = event_tx.send(WatchEvent::new(path, operation));
                    }
                }
                Err(err) => {
                    let _ = error_tx.send(SourceError::Backend(err));
                }
            },
            Config::default(),
        )?;

        Ok(EventSource::new(
            event_rx,
            error_rx,
            Box::new(NotifyBackend { watcher }),
        ))
    }
}

/// Build a notify-backed source watching every directory in `dirs`.
///
/// Fails on the first directory that cannot be watched.
pub fn build_event_source(dirs: &[PathBuf]) -> Result<EventSource> {
    let mut source = EventSource::notify()?;

    let shown: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
    info!("Watching directories: {}", shown.join(", "));

    for dir in dirs {
        source.add(dir)?;
    }
    Ok(source)
}

/// Map a notify event kind onto our operation flags.
pub fn operation_for(kind: &EventKind) -> Operation {
    match kind {
        EventKind::Create(_) => Operation::CREATE,
        EventKind::Remove(_) => Operation::REMOVE,
        EventKind::Modify(ModifyKind::Name(_)) => Operation::RENAME,
        EventKind::Modify(ModifyKind::Metadata(_)) => Operation::CHMOD,
        EventKind::Modify(_) => Operation::WRITE,
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Operation::empty(),
    }
}
