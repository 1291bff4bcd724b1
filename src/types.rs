// src/types.rs

//! Shared value types: the operation bit-flag set and the event that flows
//! from the event source through the filter into the runner.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use bitflags::bitflags;

bitflags! {
    /// Kind(s) of filesystem operation carried by a [`WatchEvent`].
    ///
    /// A single event may carry several flags (e.g. a write that also
    /// touched permissions). The same type doubles as the user-configured
    /// mask of operations we care about.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Operation: u8 {
        const CREATE = 1;
        const WRITE = 1 << 1;
        const REMOVE = 1 << 2;
        const RENAME = 1 << 3;
        const CHMOD = 1 << 4;
    }
}

impl Operation {
    /// Mask used when the user does not pass any `--event`.
    pub const DEFAULT_MASK: Operation = Operation::CREATE.union(Operation::WRITE);

    /// Lower-case names, in flag order, as accepted by `--event`.
    pub const NAMES: [(&'static str, Operation); 5] = [
        ("create", Operation::CREATE),
        ("write", Operation::WRITE),
        ("remove", Operation::REMOVE),
        ("rename", Operation::RENAME),
        ("chmod", Operation::CHMOD),
    ];

    /// Fold a list of names into a mask. An empty list yields the default.
    pub fn mask_from_names<I, S>(names: I) -> Result<Operation, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = Operation::empty();
        for name in names {
            mask |= name.as_ref().parse::<Operation>()?;
        }
        if mask.is_empty() {
            Ok(Operation::DEFAULT_MASK)
        } else {
            Ok(mask)
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Operation::NAMES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, op)| *op)
            .ok_or_else(|| {
                format!(
                    "unknown event: {s} (expected create, write, remove, rename or chmod)"
                )
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = Operation::NAMES
            .iter()
            .filter(|(_, op)| self.contains(*op))
            .map(|(name, _)| *name)
            .collect();
        f.write_str(&names.join("|"))
    }
}

/// A single filesystem change, as delivered by an event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub operation: Operation,
}

impl WatchEvent {
    pub fn new(path: impl Into<PathBuf>, operation: Operation) -> Self {
        Self {
            path: path.into(),
            operation,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
