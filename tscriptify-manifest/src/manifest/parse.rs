//! Manifest parsing from files and strings.

use std::{collections::HashMap, path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext, lower::Lowering};

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "tscriptify.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, MANIFEST_FILE)
    }
}

impl Manifest {
    /// Parse a tscriptify.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a tscriptify.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
///
/// Names are checked first, then the manifest is lowered once so that
/// unknown types, malformed type expressions and tags are reported with
/// source spans.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let names = manifest
        .enums
        .iter()
        .map(|e| (e.name.as_str(), "enum"))
        .chain(manifest.types.iter().map(|t| (t.name.as_str(), "type")));
    for (name, kind) in names {
        ctx.validate_name(name, kind)?;
        let count = seen.entry(name).or_insert(0);
        *count += 1;
        if *count > 1 {
            return Err(ctx.source_context().duplicate_error(
                name,
                super::validate::find_name_span(src, name, 0),
                super::validate::find_name_span(src, name, 1),
            ));
        }
    }

    for decl in &manifest.enums {
        let enum_ctx = ctx.push(&decl.name);
        if decl.values.is_empty() {
            return Err(ctx.source_context().validation_error(
                format!("enum '{}' has no values", decl.name),
                ctx.find_span(&decl.name),
            ));
        }
        for member in &decl.values {
            enum_ctx.validate_name(&member.name, "enum member")?;
        }
    }

    for decl in &manifest.types {
        if let Some(ts_name) = &decl.ts_name {
            ctx.validate_name(ts_name, "ts_name")?;
        }
        let type_ctx = ctx.push(&decl.name);
        for field in &decl.fields {
            type_ctx.validate_field_name(&field.name)?;
        }
    }

    Lowering::new(manifest, Some(&ctx)).run()?;
    Ok(())
}
