//! Lowering a manifest into a type graph.

use tracing::warn;
use tscriptify_ir::{
    EnumElement, Field, Kind, TagError, Tags, TypeGraph, TypeId, TypeOptions, TypeShape,
};

use crate::{Error, Manifest, ParseContext, Result, TypeExpr};

/// A type registered for conversion.
#[derive(Debug, Clone)]
pub struct Root {
    pub id: TypeId,
    /// Display name override (`ts_name`)
    pub name: Option<String>,
    /// Overrides that only apply to fields of this type, keyed by field type
    pub field_options: Vec<(TypeId, TypeOptions)>,
}

/// An enum value type with its members.
#[derive(Debug, Clone)]
pub struct EnumModel {
    pub id: TypeId,
    pub elements: Vec<EnumElement>,
}

/// Result of lowering a manifest.
#[derive(Debug, Clone)]
pub struct Model {
    pub graph: TypeGraph,
    pub roots: Vec<Root>,
    pub enums: Vec<EnumModel>,
    /// Global overrides keyed by field type
    pub overrides: Vec<(TypeId, TypeOptions)>,
}

impl Manifest {
    /// Build the type graph described by this manifest.
    pub fn lower(&self) -> Result<Model> {
        Lowering::new(self, None).run()
    }
}

/// Lowering pass. With a [`ParseContext`] errors point into the source.
pub(crate) struct Lowering<'m, 'c> {
    manifest: &'m Manifest,
    ctx: Option<&'c ParseContext<'c>>,
    graph: TypeGraph,
}

impl<'m, 'c> Lowering<'m, 'c> {
    pub(crate) fn new(manifest: &'m Manifest, ctx: Option<&'c ParseContext<'c>>) -> Self {
        Self {
            manifest,
            ctx,
            graph: TypeGraph::new(),
        }
    }

    pub(crate) fn run(mut self) -> Result<Model> {
        let manifest = self.manifest;

        for decl in &manifest.enums {
            self.graph.declare(decl.name.as_str());
        }
        for decl in &manifest.types {
            self.graph.declare(decl.name.as_str());
        }

        let mut enums = Vec::new();
        for decl in &manifest.enums {
            let id = self.declared(&decl.name);
            let kind = Kind::from_basic_name(&decl.ty)
                .filter(|kind| kind.is_basic())
                .ok_or_else(|| {
                    self.validation(
                        format!(
                            "enum '{}' must have a basic type, found '{}'",
                            decl.name, decl.ty
                        ),
                        &decl.ty,
                    )
                })?;
            self.graph.define(id, TypeShape::Basic(kind));
            let elements = decl
                .values
                .iter()
                .map(|member| EnumElement::new(member.value.clone(), member.name.as_str()))
                .collect();
            enums.push(EnumModel { id, elements });
        }

        // Struct types first so that named non-struct types can refer to them.
        for decl in manifest.types.iter().filter(|t| t.underlying.is_none()) {
            let id = self.declared(&decl.name);
            let mut fields = Vec::with_capacity(decl.fields.len());
            for field in &decl.fields {
                let context = format!("field '{}' of '{}'", field.name, decl.name);
                let ty = self.resolve(&field.ty, &context)?;
                let tags = Tags::parse(&field.tag)
                    .map_err(|e| self.tag_error(&field.name, &field.tag, e))?;
                let mut lowered = Field::new(field.name.as_str(), ty).with_tags(tags);
                if field.embedded {
                    lowered = lowered.embedded();
                }
                if let Some(exported) = field.exported {
                    lowered = lowered.with_exported(exported);
                }
                fields.push(lowered);
            }
            self.graph.define(id, TypeShape::Struct(fields));
        }

        for decl in &manifest.types {
            let Some(underlying) = &decl.underlying else {
                continue;
            };
            let id = self.declared(&decl.name);
            let context = format!("underlying type of '{}'", decl.name);
            let target = self.resolve(underlying, &context)?;
            if target == id {
                return Err(self.validation(
                    format!("type '{}' cannot be its own underlying type", decl.name),
                    underlying,
                ));
            }
            let shape = self.graph.shape(target).clone();
            self.graph.define(id, shape);
        }

        let mut overrides = Vec::new();
        for decl in &manifest.overrides {
            let ty = self.resolve(&decl.ty, "override")?;
            overrides.push((ty, decl.options()));
        }

        let mut roots = Vec::new();
        let root_names = manifest.root_names();
        for name in &root_names {
            let decl = manifest.type_decl(name).ok_or_else(|| {
                self.validation(format!("root '{}' is not a declared type", name), name)
            })?;
            let mut field_options = Vec::new();
            for o in &decl.overrides {
                let context = format!("overrides of '{}'", decl.name);
                let ty = self.resolve(&o.ty, &context)?;
                field_options.push((ty, o.options()));
            }
            roots.push(Root {
                id: self.declared(&decl.name),
                name: decl.ts_name.clone(),
                field_options,
            });
        }

        for decl in &manifest.types {
            let is_root = root_names.contains(&decl.name.as_str());
            if !is_root && (decl.ts_name.is_some() || !decl.overrides.is_empty()) {
                warn!(
                    type_name = %decl.name,
                    "ts_name and overrides only apply to converted roots, ignoring them"
                );
            }
        }

        Ok(Model {
            graph: self.graph,
            roots,
            enums,
            overrides,
        })
    }

    /// Handle of a name declared at the start of the pass.
    fn declared(&mut self, name: &str) -> TypeId {
        self.graph.declare(name)
    }

    fn resolve(&mut self, text: &str, context: &str) -> Result<TypeId> {
        let expr = TypeExpr::parse(text).map_err(|reason| self.type_expr_error(text, reason))?;
        self.resolve_expr(&expr, text, context)
    }

    fn resolve_expr(&mut self, expr: &TypeExpr, text: &str, context: &str) -> Result<TypeId> {
        let id = match expr {
            TypeExpr::Named(name) => match Kind::from_basic_name(name) {
                Some(kind) => self.graph.basic(kind),
                None => self
                    .graph
                    .lookup(name)
                    .ok_or_else(|| self.unknown_type(name, text, context))?,
            },
            TypeExpr::Pointer(inner) => {
                let elem = self.resolve_expr(inner, text, context)?;
                self.graph.pointer_to(elem)
            }
            TypeExpr::Slice(inner) => {
                let elem = self.resolve_expr(inner, text, context)?;
                self.graph.slice_of(elem)
            }
            TypeExpr::Array(len, inner) => {
                let elem = self.resolve_expr(inner, text, context)?;
                self.graph.array_of(elem, *len)
            }
            TypeExpr::Map(key, value) => {
                let key = self.resolve_expr(key, text, context)?;
                let value = self.resolve_expr(value, text, context)?;
                self.graph.map_of(key, value)
            }
        };
        Ok(id)
    }

    fn unknown_type(&self, name: &str, text: &str, context: &str) -> Box<Error> {
        match self.ctx {
            Some(ctx) => ctx.source_context().unknown_type_error(
                name,
                context,
                ctx.find_value_span(text),
            ),
            None => Error::model(format!("unknown type '{}' in {}", name, context)),
        }
    }

    fn type_expr_error(&self, text: &str, reason: &str) -> Box<Error> {
        match self.ctx {
            Some(ctx) => ctx
                .source_context()
                .type_expr_error(text, reason, ctx.find_value_span(text)),
            None => Error::model(format!("malformed type expression '{}': {}", text, reason)),
        }
    }

    fn tag_error(&self, field: &str, text: &str, source: TagError) -> Box<Error> {
        match self.ctx {
            Some(ctx) => ctx
                .source_context()
                .tag_error(field, source, ctx.find_value_span(text)),
            None => Error::model(format!("invalid tag on field '{}': {}", field, source)),
        }
    }

    fn validation(&self, message: String, needle: &str) -> Box<Error> {
        match self.ctx {
            Some(ctx) => ctx
                .source_context()
                .validation_error(message, ctx.find_value_span(needle)),
            None => Error::model(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use tscriptify_ir::EnumValue;

    use super::*;

    const MANIFEST: &str = r#"
        [[enums]]
        name = "Weekday"
        type = "int"
        values = [{ name = "Sunday", value = 0 }, { name = "Monday", value = 1 }]

        [[types]]
        name = "time.Time"

        [[types]]
        name = "Tags"
        underlying = "[]string"

        [[types]]
        name = "Node"
        fields = [
            { name = "Value", type = "int64", tag = 'json:"value"' },
            { name = "Next", type = "*Node", tag = 'json:"next,omitempty"' },
            { name = "Day", type = "Weekday" },
        ]

        [[types]]
        name = "Event"
        ts_name = "EventDto"
        fields = [
            { name = "At", type = "time.Time", tag = 'json:"at"' },
            { name = "Tags", type = "Tags" },
            { name = "secret", type = "string" },
        ]
        overrides = [{ type = "time.Time", ts_type = "string" }]

        [[overrides]]
        type = "time.Time"
        ts_type = "Date"
        ts_transform = "new Date(__VALUE__)"
    "#;

    #[test]
    fn test_lower_graph() {
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let model = manifest.lower().unwrap();
        let graph = &model.graph;

        let node = graph.lookup("Node").unwrap();
        let fields = graph.fields(node);
        assert_eq!(fields.len(), 3);
        assert_eq!(graph.type_string(fields[1].ty), "*Node");
        assert_eq!(graph.deref(fields[1].ty), node);
        assert_eq!(fields[0].tags.value("json").as_deref(), Some("value"));

        let tags = graph.lookup("Tags").unwrap();
        assert_eq!(graph.kind(tags), Kind::Slice);
        assert_eq!(graph.name(tags), Some("Tags"));

        let weekday = graph.lookup("Weekday").unwrap();
        assert_eq!(graph.shape(weekday), &TypeShape::Basic(Kind::Int));
        assert_eq!(model.enums.len(), 1);
        assert_eq!(model.enums[0].id, weekday);
        assert_eq!(model.enums[0].elements[1].name, "Monday");
        assert_eq!(model.enums[0].elements[1].value, EnumValue::Int(1));

        let event = graph.lookup("Event").unwrap();
        assert!(!graph.fields(event)[2].exported);
    }

    #[test]
    fn test_lower_roots_and_overrides() {
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let model = manifest.lower().unwrap();
        let time = model.graph.lookup("time.Time").unwrap();

        let names: Vec<&str> = model
            .roots
            .iter()
            .filter_map(|r| model.graph.name(r.id))
            .collect();
        assert_eq!(names, ["time.Time", "Node", "Event"]);

        let event = &model.roots[2];
        assert_eq!(event.name.as_deref(), Some("EventDto"));
        assert_eq!(event.field_options.len(), 1);
        assert_eq!(event.field_options[0].0, time);
        assert_eq!(event.field_options[0].1.ts_type.as_deref(), Some("string"));

        assert_eq!(model.overrides.len(), 1);
        assert_eq!(model.overrides[0].0, time);
        assert_eq!(
            model.overrides[0].1.ts_transform.as_deref(),
            Some("new Date(__VALUE__)")
        );
    }

    #[test]
    fn test_lower_unknown_root_without_source() {
        let mut manifest: Manifest = MANIFEST.parse().unwrap();
        manifest.roots = vec!["Missing".to_string()];
        let err = manifest.lower().unwrap_err();
        assert!(matches!(*err, Error::Model { .. }));
        assert_eq!(err.to_string(), "root 'Missing' is not a declared type");
    }

    #[test]
    fn test_enum_requires_basic_type() {
        let result: Result<Manifest> = r#"
            [[enums]]
            name = "Bad"
            type = "[]int"
            values = [{ name = "A", value = 1 }]
        "#
        .parse();
        let err = result.unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_self_underlying_is_rejected() {
        let result: Result<Manifest> = r#"
            [[types]]
            name = "Loop"
            underlying = "Loop"
        "#
        .parse();
        assert!(result.is_err());
    }
}
