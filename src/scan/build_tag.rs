// src/scan/build_tag.rs

use super::ScanWarning;

/// Build-constraint directives recognised on a file's first line.
pub const BUILD_DIRECTIVES: [&str; 2] = ["// +build", "//go:build"];

/// Extract a build tag from the first line of a source file.
///
/// Only a directive with exactly one token yields a tag. Any other token
/// count is reported as ambiguous and treated as "no tag".
pub fn detect_build_tag(first_line: &str) -> Result<Option<String>, ScanWarning> {
    let line = first_line.trim_end();

    for directive in BUILD_DIRECTIVES {
        let Some(rest) = line.strip_prefix(directive) else {
            continue;
        };
        // `// +buildfoo` is not a directive.
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            continue;
        }

        let tokens: Vec<&str> = rest.split_whitespace().collect();
        return match tokens.as_slice() {
            [tag] => Ok(Some((*tag).to_string())),
            _ => Err(ScanWarning::AmbiguousBuildTag {
                line: line.to_string(),
            }),
        };
    }

    Ok(None)
}
