// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Component, Path, PathBuf};

/// Render `path` with forward slashes, without a leading `./` and without a
/// trailing `/`. The working directory itself renders as `""`.
pub fn slash_path(path: &Path) -> String {
    let s = path.to_string_lossy().replace('\\', "/");
    let mut s = s.as_str();
    while let Some(rest) = s.strip_prefix("./") {
        s = rest;
    }
    let s = s.trim_end_matches('/');
    if s == "." { String::new() } else { s.to_string() }
}

/// Make `path` relative to `root` when it lives underneath it.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks such as `/private/var` on macOS),
///   we canonicalize both paths and try again.
/// - Otherwise the path is returned unchanged.
pub fn relative_to(root: &Path, path: &Path) -> PathBuf {
    if !path.is_absolute() {
        return path.to_path_buf();
    }
    if let Ok(rel) = path.strip_prefix(root) {
        return rel.to_path_buf();
    }
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return rel.to_path_buf();
        }
    }
    path.to_path_buf()
}

/// Containing directory of `path`, with `.` for a bare file name.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Prefix a relative path with `./` so tools treat it as a path rather than
/// a package or module name.
pub fn dot_slash(path: &Path) -> String {
    let s = path.to_string_lossy();
    match path.components().next() {
        Some(Component::CurDir) => s.into_owned(),
        _ => format!(".{}{}", std::path::MAIN_SEPARATOR, s),
    }
}
