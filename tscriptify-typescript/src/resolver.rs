//! Wire names, optionality and effective field options.

use std::fmt;

use tscriptify_core::camel_case;
use tscriptify_ir::{Field, TAG_JSON, TypeId, TypeOptions};

use crate::{ConversionRegistry, ConverterOptions};

/// Name of a property as written in the output, plus its `?` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireName {
    pub name: String,
    pub optional: bool,
}

impl WireName {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: true,
        }
    }
}

impl fmt::Display for WireName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "{}?", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Wire name of `field`, or `None` when the field is not serialized.
///
/// The first component of the `json` tag names the property; an empty
/// component falls back to the field name. Without a tag only exported
/// fields are kept. `-` skips the field. Pointer fields, tagged or not, and
/// fields tagged `omitempty` are optional.
pub fn wire_name(field: &Field, is_ptr: bool, options: &ConverterOptions) -> Option<WireName> {
    let mut wire = match field.tags.value(TAG_JSON) {
        Some(tag) => {
            let parts: Vec<&str> = tag.split(',').collect();
            let mut name = parts[0].trim().to_string();
            if name.is_empty() {
                name = field.name.clone();
            }

            let mut omit_empty = false;
            let mut ignored = false;
            for part in parts.iter().filter(|p| !p.is_empty()) {
                if *part == "omitempty" {
                    omit_empty = true;
                    break;
                }
                if *part == "-" {
                    ignored = true;
                    break;
                }
            }

            WireName {
                name,
                optional: (!ignored && is_ptr) || omit_empty,
            }
        }
        None if field.exported => WireName {
            name: field.name.clone(),
            optional: is_ptr,
        },
        None => return None,
    };

    if options.camel_case_fields {
        wire.name = camel_case(&wire.name, options.camel_case);
    }

    (!wire.name.is_empty() && wire.name != "-").then_some(wire)
}

/// Effective options of a field of type `field.ty` declared in `declaring`.
///
/// Tag values come first. Then every struct-specific override registered
/// for `declaring` (in registration order), then the global override for
/// the field type. Each non-empty `ts_type` / `ts_transform` replaces the
/// previous one, so a global override beats a struct-specific one.
pub fn field_options(
    registry: &ConversionRegistry,
    declaring: TypeId,
    field: &Field,
) -> TypeOptions {
    let mut options = TypeOptions::from_tags(&field.tags);

    for strct in registry.structs().iter().filter(|s| s.id == declaring) {
        if let Some(overrides) = strct.field_options(field.ty) {
            options.apply_override(overrides);
        }
    }

    if let Some(overrides) = registry.managed_type(field.ty) {
        options.apply_override(overrides);
    }

    options
}

#[cfg(test)]
mod tests {
    use tscriptify_core::CamelCaseOptions;
    use tscriptify_ir::{Kind, Tags, TypeGraph};

    use super::*;
    use crate::StructType;

    fn field(name: &str, tag: &str) -> Field {
        let mut graph = TypeGraph::new();
        let ty = graph.basic(Kind::String);
        Field::new(name, ty).with_tags(tag.parse::<Tags>().unwrap())
    }

    fn resolve(name: &str, tag: &str, is_ptr: bool) -> Option<WireName> {
        wire_name(&field(name, tag), is_ptr, &ConverterOptions::default())
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(
            resolve("Name", r#"json:"name""#, false),
            Some(WireName::required("name"))
        );
    }

    #[test]
    fn test_empty_tag_name_falls_back_to_field_name() {
        assert_eq!(
            resolve("Name", r#"json:",omitempty""#, false),
            Some(WireName::optional("Name"))
        );
    }

    #[test]
    fn test_pointer_is_optional() {
        assert_eq!(
            resolve("Next", r#"json:"next""#, true),
            Some(WireName::optional("next"))
        );
        assert_eq!(resolve("Next", "", true), Some(WireName::optional("Next")));
        assert_eq!(
            resolve("Next", r#"json:",omitempty""#, true),
            Some(WireName::optional("Next"))
        );
    }

    #[test]
    fn test_ignored_fields() {
        assert_eq!(resolve("Secret", r#"json:"-""#, false), None);
        assert_eq!(resolve("Secret", r#"json:"-""#, true), None);
        assert_eq!(resolve("secret", "", false), None);
    }

    #[test]
    fn test_untagged_exported_field() {
        assert_eq!(resolve("Age", "", false), Some(WireName::required("Age")));
    }

    #[test]
    fn test_camel_case_applies_to_wire_name() {
        let options = ConverterOptions::default()
            .with_camel_case_fields(true, CamelCaseOptions::default());
        let wire = wire_name(&field("XMLData", r#"json:"XMLData,omitempty""#), false, &options);
        assert_eq!(wire, Some(WireName::optional("xmlData")));
    }

    #[test]
    fn test_display() {
        assert_eq!(WireName::optional("a").to_string(), "a?");
        assert_eq!(WireName::required("a").to_string(), "a");
    }

    #[test]
    fn test_global_override_beats_struct_override() {
        let mut graph = TypeGraph::new();
        let time = graph.named("Time", Kind::Int64);
        let event = graph.struct_type("Event", vec![Field::new("At", time)]);
        let at = graph.fields(event)[0].clone();

        let mut registry = ConversionRegistry::new();
        registry.add_struct(
            StructType::new(event)
                .with_field_options(time, TypeOptions::new().with_ts_type("string")),
        );
        assert_eq!(
            field_options(&registry, event, &at).ts_type.as_deref(),
            Some("string")
        );

        registry.manage_type(time, TypeOptions::new().with_ts_type("Date"));
        let options = field_options(&registry, event, &at);
        assert_eq!(options.ts_type.as_deref(), Some("Date"));
    }

    #[test]
    fn test_tag_options_are_the_base() {
        let mut graph = TypeGraph::new();
        let text = graph.basic(Kind::String);
        let tags: Tags = r#"json:"at" ts_doc:"When" ts_type:"Date""#.parse().unwrap();
        let at = Field::new("At", text).with_tags(tags);
        let event = graph.struct_type("Event", vec![at.clone()]);

        let mut registry = ConversionRegistry::new();
        registry.manage_type(text, TypeOptions::new().with_ts_doc("ignored"));
        let options = field_options(&registry, event, &at);
        assert_eq!(options.ts_type.as_deref(), Some("Date"));
        assert_eq!(options.ts_doc.as_deref(), Some("When"));
    }
}
