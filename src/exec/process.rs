// src/exec/process.rs

//! Child-process executor.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::backend::{CommandExecutor, Invocation, RunOutcome};
use crate::errors::{RamError, Result};

/// Runs invocations as child processes with inherited stdio.
///
/// The child is killed if the execution future is dropped before it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>> {
        Box::pin(async move {
            debug!(cmd = %invocation, "starting test process");

            let mut child = Command::new(&invocation.program)
                .args(&invocation.args)
                .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .kill_on_drop(true)
                .spawn()
                .map_err(|source| RamError::SpawnError {
                    program: invocation.program.clone(),
                    source,
                })?;

            let status = child.wait().await?;
            let code = status.code().unwrap_or(-1);

            info!(
                exit_code = code,
                success = status.success(),
                "test process exited"
            );

            Ok(if status.success() {
                RunOutcome::Success
            } else {
                RunOutcome::Failed(code)
            })
        })
    }
}
