use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use ram::errors::{RamError, Result};
use ram::exec::{CommandExecutor, Invocation, RunOutcome};

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    Exit(RunOutcome),
    SpawnFails,
}

/// An executor that:
/// - records every invocation it was asked to run
/// - finishes with a fixed outcome
/// - optionally blocks each run until the test calls [`release`].
///
/// [`release`]: RecordingExecutor::release
#[derive(Debug, Clone)]
pub struct RecordingExecutor {
    calls: Arc<Mutex<Vec<Invocation>>>,
    behaviour: Behaviour,
    gate: Option<Arc<Notify>>,
}

impl RecordingExecutor {
    /// Every run succeeds immediately.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            behaviour: Behaviour::Exit(RunOutcome::Success),
            gate: None,
        }
    }

    /// Every run exits with `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            behaviour: Behaviour::Exit(RunOutcome::Failed(code)),
            ..Self::new()
        }
    }

    /// Every run fails to spawn.
    pub fn spawn_failure() -> Self {
        Self {
            behaviour: Behaviour::SpawnFails,
            ..Self::new()
        }
    }

    /// Every run blocks until [`RecordingExecutor::release`] is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::new()
        }
    }

    /// Let one blocked (or the next) run finish.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Poll until at least `n` runs have started.
    pub async fn wait_for_runs(&self, n: usize) {
        while self.count() < n {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(invocation.clone());

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            match self.behaviour {
                Behaviour::Exit(outcome) => Ok(outcome),
                Behaviour::SpawnFails => Err(RamError::SpawnError {
                    program: invocation.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
                }),
            }
        })
    }
}
