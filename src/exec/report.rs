// src/exec/report.rs

//! The textual start/end report printed around every run.
//!
//! Printed on stdout, interleaved with the command's own output; logging
//! stays on stderr.

use std::path::Path;
use std::time::Duration;

use super::backend::{Invocation, RunOutcome};
use crate::errors::Result;

pub fn start_line(invocation: &Invocation) -> String {
    format!("Running: {invocation}")
}

pub fn end_line(elapsed: Duration, changed: &Path, result: &Result<RunOutcome>) -> String {
    let changed = changed.display();
    match result {
        Ok(RunOutcome::Success) => format!("PASS {changed} ({elapsed:.3?})"),
        Ok(RunOutcome::Failed(code)) => {
            format!("FAIL {changed} ({elapsed:.3?}): exit status {code}")
        }
        Err(err) => format!("FAIL {changed} ({elapsed:.3?}): {err}"),
    }
}

pub fn print_start(invocation: &Invocation) {
    println!("{}", start_line(invocation));
}

pub fn print_end(elapsed: Duration, changed: &Path, result: &Result<RunOutcome>) {
    println!("{}", end_line(elapsed, changed, result));
}
