// src/scan/go.rs

//! Go source scanner backed by `tree-sitter-go`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use tree_sitter::Parser;

use super::{Scan, ScanWarning, SourceScanner, detect_build_tag};
use crate::fs::FileSystem;

/// File-name suffix that marks a Go test file.
pub const TEST_FILE_SUFFIX: &str = "_test.go";

/// Name prefix of test functions.
pub const TEST_FUNC_PREFIX: &str = "Test";

/// Scans Go files for build tags and top-level `TestXxx` functions.
#[derive(Clone)]
pub struct GoScanner {
    fs: Arc<dyn FileSystem>,
}

impl fmt::Debug for GoScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoScanner").finish_non_exhaustive()
    }
}

impl GoScanner {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }
}

impl SourceScanner for GoScanner {
    fn is_test_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(TEST_FILE_SUFFIX))
    }

    fn scan(&self, path: &Path) -> Scan {
        let mut scan = Scan::default();

        let bytes = match self.fs.read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                scan.warnings.push(ScanWarning::Unreadable {
                    path: path.to_path_buf(),
                    reason: format!("{err:#}"),
                });
                return scan;
            }
        };

        // The tag only needs the first line, decoded lossily.
        let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
        match detect_build_tag(&String::from_utf8_lossy(first_line)) {
            Ok(tag) => scan.build_tag = tag,
            Err(warning) => scan.warnings.push(warning),
        }

        if self.is_test_file(path) {
            match std::str::from_utf8(&bytes) {
                Ok(source) => match test_functions(path, source) {
                    Ok(tests) => scan.tests = tests,
                    Err(warning) => scan.warnings.push(warning),
                },
                Err(_) => scan.warnings.push(ScanWarning::NotUtf8 {
                    path: path.to_path_buf(),
                }),
            }
        }

        debug!(
            path = %path.display(),
            tag = ?scan.build_tag,
            tests = scan.tests.len(),
            "scanned source file"
        );
        scan
    }
}

/// Names of top-level test functions in `source`, in declaration order.
///
/// Methods never count, even when their name starts with `Test`.
pub fn test_functions(path: &Path, source: &str) -> Result<Vec<String>, ScanWarning> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| ScanWarning::Grammar(e.to_string()))?;

    let syntax_error = || ScanWarning::Syntax {
        path: path.to_path_buf(),
    };
    let tree = parser.parse(source, None).ok_or_else(syntax_error)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error());
    }

    let mut cursor = root.walk();
    let tests: Vec<String> = root
        .named_children(&mut cursor)
        .filter(|node| node.kind() == "function_declaration")
        .filter_map(|node| node.child_by_field_name("name"))
        .filter_map(|name| name.utf8_text(source.as_bytes()).ok())
        .filter(|name| name.starts_with(TEST_FUNC_PREFIX))
        .map(str::to_string)
        .collect();

    Ok(tests)
}
