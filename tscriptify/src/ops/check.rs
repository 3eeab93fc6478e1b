//! Check operation - convert in memory without writing.

use std::path::Path;

use tscriptify_manifest::{Manifest, Model};
use tscriptify_typescript::PreservedCode;

use super::convert::{build_converter, make_all_optional};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// The manifest has already been parsed and lowered; this runs the whole
/// conversion and collects what a `generate` would run into.
pub fn check(manifest: &Manifest, mut model: Model, config_path: &Path) -> CheckReport {
    let output = &manifest.output;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if output.target.is_none() {
        warnings.push("no [output] target, generate needs --target".to_string());
    }
    if output.create_from_method {
        warnings.push("create_from_method is deprecated, the constructor does the same".to_string());
    }
    if model.roots.is_empty() {
        warnings.push("nothing to convert, no struct types declared".to_string());
    }

    if output.all_optional {
        make_all_optional(&mut model);
    }
    let converter = build_converter(&model, output);
    let declarations = match converter.convert(&PreservedCode::new()) {
        Ok(code) => count_declarations(&code),
        Err(e) => {
            errors.push(e.to_string());
            0
        }
    };

    CheckReport {
        config_path: config_path.to_path_buf(),
        roots: model.roots.len(),
        enums: model.enums.len(),
        overrides: model.overrides.len(),
        declarations,
        errors,
        warnings,
    }
}

/// Top-level classes, interfaces and enums in generated code.
fn count_declarations(code: &str) -> usize {
    code.lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            ["class ", "interface ", "enum "]
                .iter()
                .any(|keyword| line.starts_with(keyword))
        })
        .count()
}
