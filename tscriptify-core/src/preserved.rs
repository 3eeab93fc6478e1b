//! Hand-written code blocks kept between regenerations.
//!
//! Generated declarations may contain a region delimited by
//! `//[Name:]` and `//[end]`. Whatever the user writes between those
//! markers is read back from the previous output and re-inserted verbatim
//! into the same declaration on the next run.

use std::{io::ErrorKind, path::Path};

use eyre::{Result, WrapErr};
use indexmap::IndexMap;

/// Declaration display name -> verbatim code found between its markers.
pub type PreservedCode = IndexMap<String, String>;

/// Closing marker of a preserved region.
pub const PRESERVED_END: &str = "//[end]";

/// Opening marker of the preserved region for `name`.
pub fn preserved_start(name: &str) -> String {
    format!("//[{}:]", name)
}

/// Extract every preserved region from previously generated text.
///
/// Trailing whitespace of each region is dropped, leading indentation of
/// its lines is kept.
pub fn parse_preserved_code(content: &str) -> PreservedCode {
    let mut result = PreservedCode::new();

    let mut current_name: Option<String> = None;
    let mut current_value = String::new();

    for line in content.split('\n') {
        let trimmed = line.trim();
        if let Some(name) = trimmed
            .strip_prefix("//[")
            .and_then(|rest| rest.strip_suffix(":]"))
        {
            current_name = Some(name.to_string());
            current_value.clear();
        } else if trimmed == PRESERVED_END {
            if let Some(name) = current_name.take() {
                result.insert(name, current_value.trim_end().to_string());
            }
            current_value.clear();
        } else if current_name.is_some() {
            current_value.push_str(line);
            current_value.push('\n');
        }
    }

    result
}

/// Load preserved regions from the file at `path`.
///
/// A missing file yields an empty map.
pub fn load_preserved_code(path: &Path) -> Result<PreservedCode> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(parse_preserved_code(&content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(PreservedCode::new()),
        Err(e) => Err(e).wrap_err_with(|| format!("failed to read '{}'", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_preserved_start_marker() {
        assert_eq!(preserved_start("Person"), "//[Person:]");
    }

    #[test]
    fn test_parse_single_region() {
        let text = "export class Person {\n    name: string;\n    //[Person:]\n    greet() {\n        return 1;\n    }\n\n    //[end]\n}\n";
        let code = parse_preserved_code(text);
        assert_eq!(code.len(), 1);
        assert_eq!(code["Person"], "    greet() {\n        return 1;\n    }");
    }

    #[test]
    fn test_parse_multiple_regions_in_order() {
        let text = "//[B:]\nb()\n//[end]\n//[A:]\na()\n//[end]\n";
        let code = parse_preserved_code(text);
        let names: Vec<&str> = code.keys().map(String::as_str).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(code["A"], "a()");
    }

    #[test]
    fn test_parse_ignores_text_outside_regions() {
        let text = "//[end]\nstray\n//[A:]\n//[end]\n";
        let code = parse_preserved_code(text);
        assert_eq!(code.len(), 1);
        assert_eq!(code["A"], "");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let code = load_preserved_code(&temp.path().join("none.ts")).unwrap();
        assert!(code.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models.ts");
        std::fs::write(&path, "//[X:]\n  keep me  \n//[end]\n").unwrap();
        let code = load_preserved_code(&path).unwrap();
        assert_eq!(code["X"], "  keep me");
    }
}
