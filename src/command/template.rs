// src/command/template.rs

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::errors::{RamError, Result};
use crate::watch::path_utils::{dot_slash, parent_dir};

/// `${name}` or `$name`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z0-9_]+)\}|\$([A-Za-z0-9_]+)").expect("placeholder regex is valid")
});

/// Command to run for a change: a fixed program prefix plus an argument
/// template whose entries may contain placeholders.
///
/// Recognised placeholders:
/// - `filepath`: the changed file's path,
/// - `dir`: its containing directory,
/// - `relative_dir`: the containing directory with a `./` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: Vec<String>,
    args: Vec<String>,
}

impl CommandTemplate {
    /// `program` must contain at least the executable name.
    pub fn new(program: Vec<String>, args: Vec<String>) -> Result<Self> {
        if program.first().is_none_or(|p| p.is_empty()) {
            return Err(RamError::ConfigError(
                "command template needs a program to run".to_string(),
            ));
        }
        Ok(Self { program, args })
    }

    pub fn program(&self) -> &[String] {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Expand every template argument for `changed`.
    pub fn expand(&self, changed: &Path) -> Vec<String> {
        let vars = Placeholders::for_path(changed);
        self.args.iter().map(|arg| vars.expand(arg)).collect()
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self
            .program
            .iter()
            .chain(self.args.iter())
            .map(String::as_str)
            .collect();
        f.write_str(&words.join(" "))
    }
}

/// Placeholder values for one changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub filepath: String,
    pub dir: String,
    pub relative_dir: String,
}

impl Placeholders {
    pub fn for_path(changed: &Path) -> Self {
        let dir = parent_dir(changed);
        Self {
            filepath: changed.to_string_lossy().into_owned(),
            dir: dir.to_string_lossy().into_owned(),
            relative_dir: dot_slash(&dir),
        }
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "filepath" => Some(&self.filepath),
            "dir" => Some(&self.dir),
            "relative_dir" => Some(&self.relative_dir),
            _ => None,
        }
    }

    /// Substitute known placeholders in `arg`; unknown ones stay verbatim.
    pub fn expand(&self, arg: &str) -> String {
        let expanded: Cow<'_, str> = PLACEHOLDER.replace_all(arg, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            match self.lookup(name) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        });
        expanded.into_owned()
    }
}
