// src/scan/mod.rs

//! Source scanning: what a changed file tells us about how to test it.
//!
//! The runner and command builder only see the [`SourceScanner`] trait, so
//! another toolchain can plug in its own notion of "test file", "test name"
//! and "build configuration" without touching either of them.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod build_tag;
pub mod go;

pub use build_tag::detect_build_tag;
pub use go::GoScanner;

/// Result of scanning one file.
///
/// An empty scan is always a valid answer: it means "no build restriction,
/// run every test in scope".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub build_tag: Option<String>,
    /// Test identifiers in declaration order.
    pub tests: Vec<String>,
    /// Conditions that reduced the scan to a best-effort answer.
    pub warnings: Vec<ScanWarning>,
}

/// Non-fatal problems found while scanning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    #[error("cannot read {path:?}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("cannot load grammar: {0}")]
    Grammar(String),

    #[error("{path:?} does not parse; running all tests")]
    Syntax { path: PathBuf },

    #[error("{path:?} is not valid UTF-8; running all tests")]
    NotUtf8 { path: PathBuf },

    #[error("detected multiple build tags, not supported: {line}")]
    AmbiguousBuildTag { line: String },
}

/// Capability to inspect a changed source file.
pub trait SourceScanner: Send + Sync {
    /// Whether `path` follows the toolchain's test-file naming convention.
    fn is_test_file(&self, path: &Path) -> bool;

    /// Extract the build tag and, for test files, the test identifiers.
    fn scan(&self, path: &Path) -> Scan;
}
