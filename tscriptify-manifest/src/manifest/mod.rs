//! Manifest types and parsing for tscriptify.toml files.

mod output;
mod parse;
mod validate;

pub use output::OutputConfig;
pub use parse::{MANIFEST_FILE, parse_manifest};
use serde::Deserialize;
use tscriptify_ir::{EnumValue, TypeOptions};
pub use validate::ParseContext;

/// Root manifest for tscriptify.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Types to convert. Empty means every struct type, in file order.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Output file and emitter settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Value types rendered as TypeScript enums
    #[serde(default)]
    pub enums: Vec<EnumDecl>,

    /// Structured type definitions
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    /// Global field-type overrides
    #[serde(default)]
    pub overrides: Vec<OverrideDecl>,
}

impl Manifest {
    /// Find a type declaration by name.
    pub fn type_decl(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Names of the types that will be converted.
    pub fn root_names(&self) -> Vec<&str> {
        if self.roots.is_empty() {
            self.types
                .iter()
                .filter(|t| t.underlying.is_none())
                .map(|t| t.name.as_str())
                .collect()
        } else {
            self.roots.iter().map(String::as_str).collect()
        }
    }
}

/// `[[enums]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumDecl {
    pub name: String,
    /// Basic underlying type, e.g. `int` or `string`
    #[serde(rename = "type")]
    pub ty: String,
    pub values: Vec<EnumMember>,
}

/// One member of an enum.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumMember {
    pub name: String,
    pub value: EnumValue,
}

/// `[[types]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,

    /// Name used in the generated code instead of `name`
    pub ts_name: Option<String>,

    /// Type expression for a named non-struct type (`type Tags []string`)
    pub underlying: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDecl>,

    /// Field-type overrides that only apply inside this type
    #[serde(default)]
    pub overrides: Vec<OverrideDecl>,
}

/// A field of a `[[types]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,

    /// Type expression
    #[serde(rename = "type")]
    pub ty: String,

    /// Struct tag text, e.g. `json:"name,omitempty"`
    #[serde(default)]
    pub tag: String,

    #[serde(default)]
    pub embedded: bool,

    /// Defaults to whether the name starts with an uppercase letter
    pub exported: Option<bool>,
}

/// Field-type override, global or per type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideDecl {
    /// Type expression of the fields this override applies to
    #[serde(rename = "type")]
    pub ty: String,
    pub ts_type: Option<String>,
    pub ts_transform: Option<String>,
    pub ts_doc: Option<String>,
}

impl OverrideDecl {
    pub fn options(&self) -> TypeOptions {
        let mut options = TypeOptions::new();
        if let Some(ts_type) = &self.ts_type {
            options = options.with_ts_type(ts_type.as_str());
        }
        if let Some(ts_transform) = &self.ts_transform {
            options = options.with_ts_transform(ts_transform.as_str());
        }
        if let Some(ts_doc) = &self.ts_doc {
            options = options.with_ts_doc(ts_doc.as_str());
        }
        options
    }
}
