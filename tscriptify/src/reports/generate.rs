//! Generate command report.

use std::path::PathBuf;

use super::output::{Output, Report};

#[derive(Debug)]
pub enum GenerateReport {
    /// The target file was rewritten.
    Written {
        target: PathBuf,
        /// Display names of the converted roots
        roots: Vec<String>,
        backup_dir: Option<PathBuf>,
    },
    /// Dry run: the code that would have been written.
    Preview {
        target: Option<PathBuf>,
        code: String,
    },
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            GenerateReport::Written {
                target,
                roots,
                backup_dir,
            } => {
                out.section(&format!("Converted ({})", roots.len()));
                for root in roots {
                    out.added_item(root);
                }
                out.newline();
                out.key_value_indented("Generated", &target.display().to_string());
                if let Some(dir) = backup_dir {
                    out.key_value_indented("Backups", &dir.display().to_string());
                }
            }
            GenerateReport::Preview { target, code } => {
                let label = target
                    .as_ref()
                    .map(|t| t.display().to_string())
                    .unwrap_or_else(|| "stdout".to_string());
                out.divider(&label);
                out.preformatted(code.trim_end());
                out.divider("Summary");
                out.preformatted(&format!("{} lines would be written", code.lines().count()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::testing::RecordingOutput;

    #[test]
    fn test_written_report() {
        let report = GenerateReport::Written {
            target: PathBuf::from("web/models.ts"),
            roots: vec!["Person".to_string(), "Order".to_string()],
            backup_dir: None,
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "Converted (2):",
                "  + Person",
                "  + Order",
                "",
                "  Generated: web/models.ts",
            ]
        );
    }

    #[test]
    fn test_preview_report() {
        let report = GenerateReport::Preview {
            target: None,
            code: "export interface A {}\n".to_string(),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            [
                "── stdout ──",
                "export interface A {}",
                "── Summary ──",
                "1 lines would be written",
            ]
        );
    }
}
