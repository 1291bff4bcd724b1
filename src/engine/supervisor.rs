// src/engine/supervisor.rs

//! The watch supervisor: owns the event source for the lifetime of the
//! loop, filters events into the runner and stops after a quiet period.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::engine::runner::{Runner, Submission};
use crate::errors::{RamError, Result};
use crate::watch::filter::EventFilter;
use crate::watch::source::{EventSource, SourceMessage};

/// Everything [`watch`] needs besides the source.
#[derive(Debug)]
pub struct WatchOptions {
    /// Quiet period after which the loop exits successfully.
    pub idle_timeout: Duration,
    pub runner: Runner,
    pub filter: EventFilter,
    /// External shutdown (e.g. Ctrl-C).
    pub shutdown: CancellationToken,
}

/// Run the watch loop until the idle timeout, a shutdown request or a
/// terminal source failure.
///
/// - Relevant events are submitted to the runner and reset the idle timer.
/// - Transient source errors are logged and the loop carries on.
/// - A terminal source error, or the source closing, ends the loop with an
///   error.
///
/// On every exit path the runner is cancelled and the source is released.
pub async fn watch(mut source: EventSource, options: WatchOptions) -> Result<()> {
    let WatchOptions {
        idle_timeout,
        runner,
        filter,
        shutdown,
    } = options;

    info!("watch loop started (idle timeout {:?})", idle_timeout);

    let idle = tokio::time::sleep(idle_timeout);
    tokio::pin!(idle);

    let outcome = loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                info!("shutdown requested; stopping watch loop");
                break Ok(());
            }
            () = &mut idle => {
                info!("Idle timeout hit: {:?}", idle_timeout);
                break Ok(());
            }
            message = source.recv() => match message {
                SourceMessage::Event(event) => {
                    if !filter.should_handle(&event) {
                        continue;
                    }
                    let path = event.path.clone();
                    if runner.submit(event) == Submission::Accepted {
                        debug!("Handling event for {}", path.display());
                    }
                    idle.as_mut().reset(Instant::now() + idle_timeout);
                }
                SourceMessage::Error(err) if err.is_terminal() => {
                    error!("event source failed: {err}");
                    break Err(RamError::from(err));
                }
                SourceMessage::Error(err) => {
                    warn!("watch error: {err}");
                }
                SourceMessage::Closed => {
                    error!("event source closed unexpectedly");
                    break Err(RamError::SourceClosed);
                }
            },
        }
    };

    runner.cancel();
    drop(source);
    outcome
}
