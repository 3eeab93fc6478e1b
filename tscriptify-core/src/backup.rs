//! Timestamped copies of previously generated output.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use eyre::{Result, WrapErr};

/// Name of the backup copy of `path` taken at `at`
/// (e.g. `models.ts-2024-01-31T10_15_00.250.backup`).
pub fn backup_file_name(path: &Path, at: DateTime<Local>) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}-{}.backup", base, at.format("%Y-%m-%dT%H_%M_%S%.3f"))
}

/// Copy `path` into `backup_dir` under a timestamped name.
///
/// Returns the path of the copy, or `None` when there is nothing to back up.
pub fn backup_file(path: &Path, backup_dir: &Path) -> Result<Option<PathBuf>> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).wrap_err_with(|| format!("failed to read '{}'", path.display()));
        }
    };

    let target = backup_dir.join(backup_file_name(path, Local::now()));
    if !backup_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(backup_dir).wrap_err_with(|| {
            format!("failed to create backup directory '{}'", backup_dir.display())
        })?;
    }
    std::fs::write(&target, content)
        .wrap_err_with(|| format!("failed to write backup '{}'", target.display()))?;
    Ok(Some(target))
}
