//! Generate operation.

use eyre::{Result, bail};
use tracing::info;
use tscriptify_core::{PreservedCode, load_preserved_code};
use tscriptify_manifest::{Manifest, Model};

use super::convert::{build_converter, make_all_optional};
use crate::reports::GenerateReport;

/// Convert the model and write the manifest's target, or only render it
/// when `dry_run` is set.
///
/// A dry run still reads preserved code back from an existing target so
/// the preview matches what would be written.
pub fn generate(manifest: &Manifest, mut model: Model, dry_run: bool) -> Result<GenerateReport> {
    let output = &manifest.output;
    if output.all_optional {
        make_all_optional(&mut model);
    }

    let converter = build_converter(&model, output);

    if dry_run {
        let custom_code = match &output.target {
            Some(target) => load_preserved_code(target)?,
            None => PreservedCode::new(),
        };
        let code = converter.convert(&custom_code)?;
        return Ok(GenerateReport::Preview {
            target: output.target.clone(),
            code,
        });
    }

    let Some(target) = &output.target else {
        bail!("no output file, set [output] target in the manifest or pass --target");
    };
    converter.convert_to_file(target)?;
    info!(target = %target.display(), "wrote TypeScript");

    let roots = model
        .roots
        .iter()
        .filter_map(|root| {
            root.name
                .clone()
                .or_else(|| model.graph.name(root.id).map(str::to_string))
        })
        .collect();

    Ok(GenerateReport::Written {
        target: target.clone(),
        roots,
        backup_dir: output.backup_dir(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use tscriptify_typescript::BANNER;

    use super::*;

    const MANIFEST: &str = r#"
[output]
interface = true
imports = ["import Decimal from 'decimal.js';"]

[[types]]
name = "Point"
fields = [
    { name = "X", type = "int", tag = 'json:"x"' },
    { name = "Y", type = "int", tag = 'json:"y"' },
]
"#;

    const POINT: &str = "import Decimal from 'decimal.js';\n\nexport interface Point {\n    x: number;\n    y: number;\n}\n";

    fn manifest(target: Option<std::path::PathBuf>) -> Manifest {
        let mut manifest: Manifest = MANIFEST.parse().unwrap();
        manifest.output.target = target;
        manifest
    }

    #[test]
    fn test_generate_writes_target() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("models.ts");
        let manifest = manifest(Some(target.clone()));

        let report = generate(&manifest, manifest.lower().unwrap(), false).unwrap();
        match report {
            GenerateReport::Written { roots, .. } => assert_eq!(roots, ["Point"]),
            GenerateReport::Preview { .. } => panic!("expected a written report"),
        }
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            format!("{}\n\n{}", BANNER, POINT)
        );
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("models.ts");
        let manifest = manifest(Some(target.clone()));

        let report = generate(&manifest, manifest.lower().unwrap(), true).unwrap();
        match report {
            GenerateReport::Preview { code, .. } => assert_eq!(code, POINT),
            GenerateReport::Written { .. } => panic!("expected a preview"),
        }
        assert!(!target.exists());
    }

    #[test]
    fn test_dry_run_reads_preserved_code() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("models.ts");
        fs::write(
            &target,
            "export interface Point {\n    //[Point:]\n    z?: number;\n    //[end]\n}\n",
        )
        .unwrap();
        let manifest = manifest(Some(target.clone()));

        let report = generate(&manifest, manifest.lower().unwrap(), true).unwrap();
        let GenerateReport::Preview { code, .. } = report else {
            panic!("expected a preview");
        };
        assert!(code.contains("    //[Point:]\n    z?: number;\n\n    //[end]\n"));
    }

    #[test]
    fn test_missing_target_fails() {
        let manifest = manifest(None);
        let err = generate(&manifest, manifest.lower().unwrap(), false).unwrap_err();
        assert!(err.to_string().contains("no output file"));
    }
}
