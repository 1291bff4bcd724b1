// src/engine/runner.rs

//! The debounced runner.
//!
//! Events are handed over, never queued. The loop raises a `ready` flag
//! right before it waits for the next event; a submission only goes through
//! if it is the one that lowers that flag again. While a command is running
//! the flag stays down, so every event submitted in the meantime is dropped.
//! A burst of saves therefore collapses into a single run.
//!
//! State machine:
//!
//! ```text
//! Idle --event--> Executing --exit (any status)--> Idle
//! Idle | Executing --cancel--> Terminated
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::command::CommandBuilder;
use crate::exec::{CommandExecutor, RunOutcome, report};
use crate::scan::SourceScanner;
use crate::types::WatchEvent;

/// Size of the handoff slot. It only ever holds the event the loop is
/// about to pick up.
pub const INBOX_CAPACITY: usize = 1;

/// What happened to a submitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Dropped,
}

/// Producer side of the runner. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Runner {
    inbox: mpsc::Sender<WatchEvent>,
    ready: Arc<AtomicBool>,
    cancel: CancellationToken,
}

/// Consumer side of the runner; drive it with [`RunLoop::run`].
pub struct RunLoop<S, E> {
    inbox: mpsc::Receiver<WatchEvent>,
    ready: Arc<AtomicBool>,
    worker: Worker<S, E>,
}

struct Worker<S, E> {
    builder: Arc<CommandBuilder<S>>,
    executor: E,
    cancel: CancellationToken,
}

/// Whether the loop should keep going after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

impl Runner {
    /// Create a runner whose cancellation is a child of `parent`.
    ///
    /// Nothing runs until the returned [`RunLoop`] is driven; events
    /// submitted before it first waits for work are dropped.
    pub fn new<S, E>(
        builder: CommandBuilder<S>,
        executor: E,
        parent: &CancellationToken,
    ) -> (Runner, RunLoop<S, E>)
    where
        S: SourceScanner,
        E: CommandExecutor,
    {
        let (tx, rx) = mpsc::channel::<WatchEvent>(INBOX_CAPACITY);
        let cancel = parent.child_token();
        let ready = Arc::new(AtomicBool::new(false));

        let runner = Runner {
            inbox: tx,
            ready: Arc::clone(&ready),
            cancel: cancel.clone(),
        };
        let run_loop = RunLoop {
            inbox: rx,
            ready,
            worker: Worker {
                builder: Arc::new(builder),
                executor,
                cancel,
            },
        };
        (runner, run_loop)
    }

    /// Create a runner and spawn its loop on the current Tokio runtime.
    pub fn spawn<S, E>(
        builder: CommandBuilder<S>,
        executor: E,
        parent: &CancellationToken,
    ) -> (Runner, JoinHandle<()>)
    where
        S: SourceScanner + 'static,
        E: CommandExecutor + 'static,
    {
        let (runner, run_loop) = Runner::new(builder, executor, parent);
        let handle = tokio::spawn(run_loop.run());
        (runner, handle)
    }

    /// Offer `event` to the loop without waiting.
    ///
    /// Accepted only while the loop is idle and waiting; dropped while a
    /// run is in progress, after another event already claimed the loop, or
    /// once the loop has stopped.
    pub fn submit(&self, event: WatchEvent) -> Submission {
        if self
            .ready
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Runner busy, skipping: {}", event.path.display());
            return Submission::Dropped;
        }

        match self.inbox.try_send(event) {
            Ok(()) => Submission::Accepted,
            Err(TrySendError::Full(event)) => {
                debug!("Handoff slot taken, skipping: {}", event.path.display());
                Submission::Dropped
            }
            Err(TrySendError::Closed(event)) => {
                debug!("Runner stopped, skipping: {}", event.path.display());
                Submission::Dropped
            }
        }
    }

    /// Stop the loop, killing any command in flight.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the loop is idle and would accept an event right now.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

impl<S, E> RunLoop<S, E>
where
    S: SourceScanner + 'static,
    E: CommandExecutor,
{
    /// Consume events until cancelled or every [`Runner`] handle is gone.
    pub async fn run(mut self) {
        debug!("runner loop started");

        loop {
            self.ready.store(true, Ordering::Release);
            let event = tokio::select! {
                biased;
                _ = self.worker.cancel.cancelled() => break,
                event = self.inbox.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
            };

            if self.worker.execute(event).await == Flow::Stop {
                break;
            }
        }

        self.ready.store(false, Ordering::Release);
        debug!("runner loop finished");
    }
}

impl<S, E> Worker<S, E>
where
    S: SourceScanner + 'static,
    E: CommandExecutor,
{
    async fn execute(&self, event: WatchEvent) -> Flow {
        // Scanning reads and parses the file; keep it off the async workers.
        let builder = Arc::clone(&self.builder);
        let changed = event.path.clone();
        let invocation =
            match tokio::task::spawn_blocking(move || builder.invocation(&changed)).await {
                Ok(invocation) => invocation,
                Err(err) => {
                    error!(path = %event.path.display(), error = %err, "building command failed");
                    return Flow::Continue;
                }
            };
        report::print_start(&invocation);
        let start = Instant::now();

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                info!(cmd = %invocation, "cancelled while running; stopping command");
                return Flow::Stop;
            }
            result = self.executor.execute(&invocation) => result,
        };

        match &result {
            Ok(RunOutcome::Success) => {}
            Ok(RunOutcome::Failed(code)) => {
                error!(exit_code = code, path = %event.path.display(), "test run failed");
            }
            Err(err) => error!(cmd = %invocation, error = %err, "command execution error"),
        }
        report::print_end(start.elapsed(), &event.path, &result);

        Flow::Continue
    }
}
