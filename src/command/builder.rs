// src/command/builder.rs

use std::path::Path;

use tracing::warn;

use crate::command::template::CommandTemplate;
use crate::exec::Invocation;
use crate::scan::SourceScanner;

/// Flag prefix restricting the build to one configuration.
pub const TAGS_FLAG: &str = "-tags=";

/// Flag restricting the run to tests matching a pattern.
pub const RUN_FLAG: &str = "-test.run";

/// Turns a changed file into a concrete argument list.
#[derive(Debug, Clone)]
pub struct CommandBuilder<S> {
    template: CommandTemplate,
    scanner: S,
}

impl<S: SourceScanner> CommandBuilder<S> {
    pub fn new(template: CommandTemplate, scanner: S) -> Self {
        Self { template, scanner }
    }

    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    /// Build the arguments for `changed`.
    ///
    /// Order of the output:
    /// 1. `-tags=<tag>` when the file carries a single build tag,
    /// 2. the expanded template arguments,
    /// 3. `-test.run ^A|B$` when `changed` is a test file declaring tests.
    ///
    /// Scanner problems only narrow less; they never fail the build.
    pub fn build(&self, changed: &Path) -> Vec<String> {
        let scan = self.scanner.scan(changed);
        for warning in &scan.warnings {
            warn!("{warning}");
        }

        let mut output = Vec::with_capacity(self.template.args().len() + 3);
        if let Some(tag) = &scan.build_tag {
            output.push(format!("{TAGS_FLAG}{tag}"));
        }

        output.extend(self.template.expand(changed));

        if self.scanner.is_test_file(changed) && !scan.tests.is_empty() {
            output.push(RUN_FLAG.to_string());
            output.push(test_pattern(&scan.tests));
        }

        output
    }

    /// Full invocation for `changed`: program prefix, built arguments and
    /// the test environment.
    pub fn invocation(&self, changed: &Path) -> Invocation {
        Invocation::for_change(self.template.program(), self.build(changed), changed)
    }
}

/// Anchored alternation of test names, e.g. `^TestA|TestB$`.
pub fn test_pattern(tests: &[String]) -> String {
    format!("^{}$", tests.join("|"))
}
