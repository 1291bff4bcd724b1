// src/watch/walk.rs

//! Directory enumeration for the watch set.

use std::path::PathBuf;

use tracing::debug;

use crate::errors::{RamError, Result};
use crate::fs::FileSystem;
use crate::watch::patterns::ExcludeList;

/// Collect every directory to watch.
///
/// Each root is included, followed by its sub-directories down to
/// `max_depth` levels below it. Excluded directories are skipped together
/// with everything beneath them. Output is depth-first, sorted by name,
/// and contains no duplicates across overlapping roots.
pub fn walk_directories(
    fs: &dyn FileSystem,
    roots: &[PathBuf],
    max_depth: usize,
    excludes: &ExcludeList,
) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    for root in roots {
        if !fs.is_dir(root) {
            return Err(RamError::ConfigError(format!(
                "cannot watch {:?}: not a directory",
                root
            )));
        }

        let mut stack = vec![(root.clone(), 0usize)];
        while let Some((dir, depth)) = stack.pop() {
            if excludes.is_match(&dir) {
                debug!("skipping excluded directory: {}", dir.display());
                continue;
            }
            if dirs.contains(&dir) {
                continue;
            }
            dirs.push(dir.clone());

            if depth >= max_depth {
                continue;
            }

            let mut children = match fs.read_dir(&dir) {
                Ok(children) => children,
                Err(err) => {
                    debug!("cannot list {}: {err:#}", dir.display());
                    continue;
                }
            };
            children.retain(|p| fs.is_dir(p));
            children.sort();
            // Reverse so the stack pops them in name order.
            for child in children.into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    Ok(dirs)
}
