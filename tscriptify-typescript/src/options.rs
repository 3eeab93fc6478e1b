//! Emitter settings.

use std::path::PathBuf;

use tscriptify_codegen::Indent;
use tscriptify_core::CamelCaseOptions;

/// Settings shared by every declaration of a conversion run.
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Prepended to every class, interface and enum name
    pub prefix: String,
    /// Appended to every class, interface and enum name
    pub suffix: String,
    pub indent: Indent,
    /// Emit `interface` declarations instead of classes
    pub create_interface: bool,
    pub readonly_fields: bool,
    /// Pass wire names through [`tscriptify_core::camel_case`]
    pub camel_case_fields: bool,
    pub camel_case: CamelCaseOptions,
    pub create_constructor: bool,
    /// Legacy `static createFrom` factory. Implies a constructor.
    pub create_from_method: bool,
    /// Where previous output is copied before it is replaced. `None` disables backups.
    pub backup_dir: Option<PathBuf>,
    /// Omit the `export` keyword
    pub dont_export: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            indent: Indent::FOUR_SPACES,
            create_interface: false,
            readonly_fields: false,
            camel_case_fields: false,
            camel_case: CamelCaseOptions::default(),
            create_constructor: true,
            create_from_method: false,
            backup_dir: None,
            dont_export: false,
        }
    }
}

impl ConverterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Indent::new(indent);
        self
    }

    pub fn with_interface(mut self, create_interface: bool) -> Self {
        self.create_interface = create_interface;
        self
    }

    pub fn with_readonly_fields(mut self, readonly: bool) -> Self {
        self.readonly_fields = readonly;
        self
    }

    pub fn with_camel_case_fields(mut self, enabled: bool, options: CamelCaseOptions) -> Self {
        self.camel_case_fields = enabled;
        self.camel_case = options;
        self
    }

    pub fn with_constructor(mut self, create_constructor: bool) -> Self {
        self.create_constructor = create_constructor;
        self
    }

    pub fn with_create_from_method(mut self, create_from_method: bool) -> Self {
        self.create_from_method = create_from_method;
        self
    }

    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.backup_dir = (!dir.as_os_str().is_empty()).then_some(dir);
        self
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.dont_export = !export;
        self
    }

    /// Whether classes get a constructor.
    pub fn emits_constructor(&self) -> bool {
        !self.create_interface && (self.create_constructor || self.create_from_method)
    }

    /// Class, interface or enum name as written in the output.
    pub fn entity_name(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }
}
