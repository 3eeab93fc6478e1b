//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from an in-memory conversion.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    pub roots: usize,
    pub enums: usize,
    /// Global type overrides.
    pub overrides: usize,
    /// Declarations the conversion produced.
    pub declarations: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.preformatted(&format!(
            "  {}, {}, {}",
            plural(self.roots, "root"),
            plural(self.enums, "enum"),
            plural(self.overrides, "override")
        ));
        out.preformatted(&format!("  {}", plural(self.declarations, "declaration")));
    }
}
