//! Property lines and constructor initializers of one declaration.

use tscriptify_ir::TRANSFORM_PLACEHOLDER;

use crate::WireName;

const CONVERT_VALUES: &str = "this.convertValues";

/// Accumulates the body of one class or interface.
///
/// Every `add_*_field` method goes through the same primitive, which
/// appends the property line and its initializer together, so both lists
/// stay in field order.
#[derive(Debug, Clone, Default)]
pub struct ClassBuilder {
    readonly: bool,
    members: Vec<String>,
    initializers: Vec<String>,
}

impl ClassBuilder {
    pub fn new(readonly: bool) -> Self {
        Self {
            readonly,
            ..Self::default()
        }
    }

    /// `/** doc */` above the next property.
    pub fn add_doc(&mut self, doc: &str) {
        self.members.push(format!("/** {} */", doc));
    }

    /// A raw line in the property section, with no initializer.
    pub fn add_field_definition_line(&mut self, line: &str) {
        self.members.push(line.to_string());
    }

    /// Plain property. With a transform, `__VALUE__` is replaced by the
    /// source expression to build the initializer.
    pub fn add_simple_field(&mut self, name: &WireName, ts_type: &str, transform: Option<&str>) {
        let source = source_expr(name);
        let initializer = match transform {
            Some(transform) => transform.replace(TRANSFORM_PLACEHOLDER, &source),
            None => source,
        };
        self.add_field(name, ts_type, initializer);
    }

    pub fn add_enum_field(&mut self, name: &WireName, enum_name: &str) {
        self.add_field(name, enum_name, source_expr(name));
    }

    pub fn add_struct_field(&mut self, name: &WireName, class_name: &str) {
        let initializer = format!("{}({}, {})", CONVERT_VALUES, source_expr(name), class_name);
        self.add_field(name, class_name, initializer);
    }

    /// `Class[]`, repeated `depth` times, hydrated element by element.
    pub fn add_array_of_structs_field(&mut self, name: &WireName, class_name: &str, depth: usize) {
        let initializer = format!("{}({}, {})", CONVERT_VALUES, source_expr(name), class_name);
        self.add_field(name, &array_type(class_name, depth), initializer);
    }

    /// `type[]`, repeated `depth` times, assigned as is.
    pub fn add_simple_array_field(&mut self, name: &WireName, elem_type: &str, depth: usize) {
        self.add_field(name, &array_type(elem_type, depth), source_expr(name));
    }

    /// `{[key: K]: V}`. With `hydrate` every value is rebuilt as a `V`.
    pub fn add_map_field(&mut self, name: &WireName, key: &str, value: &str, hydrate: bool) {
        let initializer = if hydrate {
            format!("{}({}, {}, true)", CONVERT_VALUES, source_expr(name), value)
        } else {
            source_expr(name)
        };
        self.add_field(name, &format!("{{[key: {}]: {}}}", key, value), initializer);
    }

    fn add_field(&mut self, name: &WireName, ts_type: &str, initializer: String) {
        let readonly = if self.readonly { "readonly " } else { "" };
        self.members.push(format!("{}{}: {};", readonly, name, ts_type));
        self.initializers
            .push(format!("this.{} = {};", name.name, initializer));
    }

    /// Property section lines, without indentation.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Constructor statements, without indentation.
    pub fn initializers(&self) -> &[String] {
        &self.initializers
    }

    /// Whether any initializer calls the hydration helper.
    pub fn needs_convert_values(&self) -> bool {
        self.initializers.iter().any(|line| line.contains(CONVERT_VALUES))
    }
}

fn source_expr(name: &WireName) -> String {
    format!("source[\"{}\"]", name.name)
}

fn array_type(elem: &str, depth: usize) -> String {
    format!("{}{}", elem, "[]".repeat(depth))
}
