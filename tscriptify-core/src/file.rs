use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// A generated output file: an optional banner followed by the body.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
    header: Option<String>,
    content: String,
}

impl OutputFile {
    /// Create a new output file with the given path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            header: None,
            content: content.into(),
        }
    }

    /// Prepend a banner, separated from the body by a blank line.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the body without the banner
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Render banner and body as they will be written.
    pub fn render(&self) -> String {
        match &self.header {
            Some(header) => format!("{}\n\n{}", header, self.content),
            None => self.content.clone(),
        }
    }

    /// Write the rendered file, replacing any existing content.
    pub fn write(&self) -> Result<()> {
        write_file(&self.path, &self.render())
    }
}
