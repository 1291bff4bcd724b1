// src/exec/backend.rs

//! Pluggable executor abstraction.
//!
//! The runner talks to a [`CommandExecutor`] instead of spawning processes
//! itself, so tests can swap in an executor that records invocations and
//! decides when they finish.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::errors::Result;
use crate::watch::path_utils::{dot_slash, parent_dir};

/// Environment variable carrying the changed file's directory (`./dir`).
pub const ENV_TEST_DIRECTORY: &str = "TEST_DIRECTORY";

/// Environment variable carrying the changed file's path (`./dir/file.go`).
pub const ENV_TEST_FILENAME: &str = "TEST_FILENAME";

/// A fully built command, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Added on top of the inherited environment.
    pub env: Vec<(String, String)>,
    /// The file whose change caused this run.
    pub changed: PathBuf,
}

impl Invocation {
    /// Combine a program prefix (e.g. `["go", "test"]`) with built
    /// arguments, and attach the test environment for `changed`.
    pub fn for_change(prefix: &[String], args: Vec<String>, changed: &Path) -> Self {
        let (program, leading) = match prefix.split_first() {
            Some((program, leading)) => (program.clone(), leading.to_vec()),
            None => (String::new(), Vec::new()),
        };

        let mut all_args = leading;
        all_args.extend(args);

        let env = vec![
            (
                ENV_TEST_DIRECTORY.to_string(),
                dot_slash(&parent_dir(changed)),
            ),
            (ENV_TEST_FILENAME.to_string(), dot_slash(changed)),
        ];

        Self {
            program,
            args: all_args,
            env,
            changed: changed.to_path_buf(),
        }
    }

    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a finished command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// Non-zero exit; `-1` when terminated by a signal.
    Failed(i32),
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, RunOutcome::Success)
    }
}

/// Trait abstracting how an invocation is executed.
///
/// Production code uses [`super::ProcessExecutor`]. Dropping the returned
/// future must stop the command; the runner relies on that for
/// cancellation.
pub trait CommandExecutor: Send + Sync {
    fn execute<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<RunOutcome>> + Send + 'a>>;
}
