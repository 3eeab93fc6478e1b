use std::path::PathBuf;

use serde::Deserialize;

/// `[output]` section: where to write and how to render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Target TypeScript file
    pub target: Option<PathBuf>,
    /// Emit interfaces instead of classes
    pub interface: bool,
    /// Mark every field `readonly`
    pub readonly: bool,
    /// camelCase field names
    pub camel_case: bool,
    pub preserve_consecutive_uppercase: bool,
    pub indent: String,
    pub prefix: String,
    pub suffix: String,
    /// Emit a hydrating constructor in classes
    pub constructor: bool,
    /// Deprecated `static createFrom` factory
    pub create_from_method: bool,
    /// Directory for backups of the previous output; empty disables backups
    pub backup_dir: String,
    pub export: bool,
    /// Mark every field of every root optional
    pub all_optional: bool,
    /// Verbatim import lines placed at the top of the output
    pub imports: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            target: None,
            interface: false,
            readonly: false,
            camel_case: false,
            preserve_consecutive_uppercase: false,
            indent: "    ".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            constructor: true,
            create_from_method: false,
            backup_dir: String::new(),
            export: true,
            all_optional: false,
            imports: Vec::new(),
        }
    }
}

impl OutputConfig {
    /// Backup directory, `None` when backups are disabled.
    pub fn backup_dir(&self) -> Option<PathBuf> {
        (!self.backup_dir.is_empty()).then(|| PathBuf::from(&self.backup_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_keys() {
        let output: OutputConfig = toml::from_str("interface = true").unwrap();
        assert!(output.interface);
        assert!(output.constructor);
        assert!(output.export);
        assert_eq!(output.indent, "    ");
        assert_eq!(output.backup_dir(), None);
    }

    #[test]
    fn test_backup_dir() {
        let output: OutputConfig = toml::from_str(r#"backup_dir = "backups""#).unwrap();
        assert_eq!(output.backup_dir(), Some(PathBuf::from("backups")));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<OutputConfig>("interfaces = true").is_err());
    }
}
