use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use tscriptify_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops::{self, Overrides},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to tscriptify.toml (defaults to ./tscriptify.toml)
    #[arg(short, long, default_value = "tscriptify.toml")]
    pub config: PathBuf,

    /// Output file (overrides [output] target)
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Generate interfaces instead of classes
    #[arg(long)]
    pub interface: bool,

    /// Mark every property readonly
    #[arg(long)]
    pub readonly: bool,

    /// camelCase property names
    #[arg(long)]
    pub camel_case: bool,

    /// Make every field of the converted types optional
    #[arg(long)]
    pub all_optional: bool,

    /// Directory receiving a timestamped copy of the previous output
    #[arg(long, value_name = "DIR")]
    pub backup: Option<PathBuf>,

    /// Import line added at the top of the output (repeatable)
    #[arg(long = "import", value_name = "LINE")]
    pub imports: Vec<String>,

    /// Print the generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Types to convert (replaces the manifest roots)
    #[arg(value_name = "STRUCTS")]
    pub structs: Vec<String>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let mut manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        self.overrides().apply(&mut manifest);
        let model = manifest.lower().unwrap_or_exit();

        let report = ops::generate(&manifest, model, self.dry_run)
            .wrap_err("Failed to generate TypeScript")?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            target: self.target.clone(),
            interface: self.interface,
            readonly: self.readonly,
            camel_case: self.camel_case,
            all_optional: self.all_optional,
            backup_dir: self.backup.clone(),
            imports: self.imports.clone(),
            roots: self.structs.clone(),
        }
    }
}
