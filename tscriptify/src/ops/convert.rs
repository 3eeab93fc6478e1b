//! Turning a lowered manifest into a configured converter.

use std::path::PathBuf;

use tracing::debug;
use tscriptify_manifest::{Manifest, Model, OutputConfig};
use tscriptify_typescript::{CamelCaseOptions, ConverterOptions, StructType, TypeScriptify};

/// Command line values that take precedence over the manifest.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<PathBuf>,
    pub interface: bool,
    pub readonly: bool,
    pub camel_case: bool,
    pub all_optional: bool,
    pub backup_dir: Option<PathBuf>,
    pub imports: Vec<String>,
    /// Replaces the manifest roots when non-empty
    pub roots: Vec<String>,
}

impl Overrides {
    pub fn apply(&self, manifest: &mut Manifest) {
        let output = &mut manifest.output;
        if let Some(target) = &self.target {
            output.target = Some(target.clone());
        }
        output.interface |= self.interface;
        output.readonly |= self.readonly;
        output.camel_case |= self.camel_case;
        output.all_optional |= self.all_optional;
        if let Some(dir) = &self.backup_dir {
            output.backup_dir = dir.display().to_string();
        }
        output.imports.extend(self.imports.iter().cloned());

        if !self.roots.is_empty() {
            manifest.roots = self.roots.clone();
        }
    }
}

pub fn converter_options(output: &OutputConfig) -> ConverterOptions {
    let camel_case = if output.preserve_consecutive_uppercase {
        CamelCaseOptions::preserve_consecutive_uppercase()
    } else {
        CamelCaseOptions::default()
    };

    let mut options = ConverterOptions::new()
        .with_prefix(output.prefix.as_str())
        .with_suffix(output.suffix.as_str())
        .with_indent(output.indent.as_str())
        .with_interface(output.interface)
        .with_readonly_fields(output.readonly)
        .with_camel_case_fields(output.camel_case, camel_case)
        .with_constructor(output.constructor)
        .with_create_from_method(output.create_from_method)
        .with_export(output.export);
    if let Some(dir) = output.backup_dir() {
        options = options.with_backup_dir(dir);
    }
    options
}

/// Replace every root by a copy whose `json` tags are all `omitempty`.
///
/// The copies are anonymous, so each one is registered under the name of
/// the type it replaces. Types reached through fields keep their tags.
pub fn make_all_optional(model: &mut Model) {
    for root in &mut model.roots {
        let name = root.name.clone().or_else(|| {
            model
                .graph
                .name(root.id)
                .and_then(|name| name.rsplit('.').next())
                .map(str::to_string)
        });
        root.id = model.graph.tag_all(root.id, &["omitempty"]);
        root.name = name;
        debug!(type_name = ?root.name, "made every field optional");
    }
}

/// Converter with the model's imports, enums, overrides and roots registered.
pub fn build_converter<'g>(model: &'g Model, output: &OutputConfig) -> TypeScriptify<'g> {
    let mut converter = TypeScriptify::new(&model.graph).with_options(converter_options(output));
    let registry = converter.registry_mut();

    for import in &output.imports {
        registry.add_import(import);
    }
    for decl in &model.enums {
        registry.add_enum(decl.id, decl.elements.clone());
    }
    for (ty, options) in &model.overrides {
        registry.manage_type(*ty, options.clone());
    }
    for root in &model.roots {
        let mut strct = StructType::new(root.id);
        if let Some(name) = &root.name {
            strct = strct.with_name(name.as_str());
        }
        for (ty, options) in &root.field_options {
            strct = strct.with_field_options(*ty, options.clone());
        }
        registry.add_struct(strct);
    }

    converter
}

#[cfg(test)]
mod tests {
    use tscriptify_typescript::PreservedCode;

    use super::*;

    const MANIFEST: &str = r#"
[[types]]
name = "Time"

[[types]]
name = "Person"
ts_name = "PersonDto"
fields = [
    { name = "Name", type = "string", tag = 'json:"name"' },
    { name = "Born", type = "Time", tag = 'json:"born"' },
]
overrides = [{ type = "Time", ts_type = "string" }]

[[overrides]]
type = "Time"
ts_type = "Date"
ts_transform = "new Date(__VALUE__)"
"#;

    fn manifest() -> Manifest {
        MANIFEST.parse().unwrap()
    }

    #[test]
    fn test_overrides_apply() {
        let mut manifest = manifest();
        Overrides {
            target: Some(PathBuf::from("out/models.ts")),
            interface: true,
            backup_dir: Some(PathBuf::from("backups")),
            imports: vec!["import { A } from './a';".to_string()],
            roots: vec!["Person".to_string()],
            ..Overrides::default()
        }
        .apply(&mut manifest);

        assert_eq!(manifest.output.target, Some(PathBuf::from("out/models.ts")));
        assert!(manifest.output.interface);
        assert!(!manifest.output.readonly);
        assert_eq!(manifest.output.backup_dir(), Some(PathBuf::from("backups")));
        assert_eq!(manifest.output.imports.len(), 1);
        assert_eq!(manifest.root_names(), ["Person"]);
    }

    #[test]
    fn test_unset_flags_keep_manifest_values() {
        let mut manifest: Manifest = "[output]\ninterface = true\n".parse().unwrap();
        Overrides::default().apply(&mut manifest);
        assert!(manifest.output.interface);
        assert_eq!(manifest.output.target, None);
    }

    #[test]
    fn test_converter_options() {
        let output = OutputConfig {
            prefix: "I".to_string(),
            indent: "\t".to_string(),
            camel_case: true,
            preserve_consecutive_uppercase: true,
            export: false,
            backup_dir: "backups".to_string(),
            ..OutputConfig::default()
        };
        let options = converter_options(&output);
        assert_eq!(options.entity_name("Person"), "IPerson");
        assert_eq!(options.indent.as_str(), "\t");
        assert!(options.camel_case_fields);
        assert!(options.camel_case.preserve_consecutive_uppercase);
        assert!(options.dont_export);
        assert_eq!(options.backup_dir, Some(PathBuf::from("backups")));
    }

    #[test]
    fn test_build_converter_registers_model() {
        let mut manifest = manifest();
        manifest.roots = vec!["Person".to_string()];
        manifest.output.interface = true;
        let model = manifest.lower().unwrap();

        let converter = build_converter(&model, &manifest.output);
        let code = converter.convert(&PreservedCode::new()).unwrap();
        assert_eq!(
            code,
            "export interface PersonDto {\n    name: string;\n    born: Date;\n}\n"
        );
    }

    #[test]
    fn test_all_optional_keeps_names() {
        let mut manifest = manifest();
        manifest.roots = vec!["Person".to_string()];
        manifest.output.interface = true;
        let mut model = manifest.lower().unwrap();
        let original = model.roots[0].id;

        make_all_optional(&mut model);
        assert_ne!(model.roots[0].id, original);
        assert_eq!(model.roots[0].name.as_deref(), Some("PersonDto"));

        let converter = build_converter(&model, &manifest.output);
        let code = converter.convert(&PreservedCode::new()).unwrap();
        assert!(code.contains("    name?: string;\n"));
    }

    #[test]
    fn test_all_optional_names_anonymous_copy_after_type() {
        let manifest: Manifest = r#"
[[types]]
name = "models.Point"
fields = [{ name = "X", type = "int", tag = 'json:"x"' }]
"#
        .parse()
        .unwrap();
        let mut model = manifest.lower().unwrap();

        make_all_optional(&mut model);
        assert_eq!(model.roots[0].name.as_deref(), Some("Point"));
    }
}
