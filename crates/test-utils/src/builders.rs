#![allow(dead_code)]

use std::sync::Arc;

use ram::command::{CommandBuilder, CommandTemplate};
use ram::fs::mock::MockFileSystem;
use ram::scan::GoScanner;

/// Builder for Go source text used as scanner fixtures.
pub struct GoSourceBuilder {
    first_line: Option<String>,
    package: String,
    decls: Vec<String>,
}

impl GoSourceBuilder {
    pub fn new(package: &str) -> Self {
        Self {
            first_line: None,
            package: package.to_string(),
            decls: Vec::new(),
        }
    }

    /// `// +build <tags>` as the first line.
    pub fn build_tag(mut self, tags: &str) -> Self {
        self.first_line = Some(format!("// +build {tags}"));
        self
    }

    /// An arbitrary first line (e.g. a `//go:build` directive).
    pub fn first_line(mut self, line: &str) -> Self {
        self.first_line = Some(line.to_string());
        self
    }

    pub fn test(mut self, name: &str) -> Self {
        self.decls
            .push(format!("func {name}(t *testing.T) {{\n\tt.Log(\"{name}\")\n}}"));
        self
    }

    pub fn func(mut self, name: &str) -> Self {
        self.decls.push(format!("func {name}() int {{\n\treturn 1\n}}"));
        self
    }

    pub fn method(mut self, receiver: &str, name: &str) -> Self {
        self.decls.push(format!(
            "type {receiver} struct{{}}\n\nfunc (s {receiver}) {name}(t *testing.T) {{}}"
        ));
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        if let Some(line) = self.first_line {
            out.push_str(&line);
            out.push_str("\n\n");
        }
        out.push_str(&format!("package {}\n\nimport \"testing\"\n\nvar _ = testing.Short\n", self.package));
        for decl in self.decls {
            out.push('\n');
            out.push_str(&decl);
            out.push('\n');
        }
        out
    }
}

/// A `go test` command builder scanning files from `fs`.
pub fn go_test_builder(fs: &MockFileSystem, args: &[&str]) -> CommandBuilder<GoScanner> {
    let template = CommandTemplate::new(
        vec!["go".to_string(), "test".to_string()],
        args.iter().map(|s| s.to_string()).collect(),
    )
    .expect("valid template");
    CommandBuilder::new(template, GoScanner::new(Arc::new(fs.clone())))
}
