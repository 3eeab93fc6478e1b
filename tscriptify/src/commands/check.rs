use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tscriptify_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to tscriptify.toml (defaults to ./tscriptify.toml)
    #[arg(short, long, default_value = "tscriptify.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let model = manifest.lower().unwrap_or_exit();

        let report = ops::check(&manifest, model, &self.config);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
