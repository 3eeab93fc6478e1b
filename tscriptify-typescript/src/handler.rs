//! Per-field conversion strategies.

use tracing::debug;
use tscriptify_ir::{Field, Kind, TypeId, TypeOptions};

use crate::{ClassBuilder, Conversion, Result, WireName};

/// A field about to be converted.
#[derive(Debug, Clone)]
pub struct FieldContext {
    /// Struct the field is declared in
    pub declaring: TypeId,
    /// The field, with one level of pointer already removed from its type
    pub field: Field,
    pub name: WireName,
    pub options: TypeOptions,
}

impl FieldContext {
    pub fn ty(&self) -> TypeId {
        self.field.ty
    }
}

/// Converts one field into property lines and initializers.
///
/// Implementations append to `builder` and return the text of any
/// declarations that must come before the one being built. An error
/// aborts the whole run.
pub trait TypeConversionHandler: Send + Sync {
    fn handle(
        &self,
        run: &mut Conversion<'_>,
        builder: &mut ClassBuilder,
        field: &FieldContext,
    ) -> Result<String>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Picks a strategy from the field's options and kind.
///
/// In order: transform, registered enum, explicit `ts_type`, struct, map,
/// slice or array, then the primitive mapping of the kind. Custom handlers
/// can delegate to it for the fields they don't treat specially.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler;

impl TypeConversionHandler for DefaultHandler {
    fn handle(
        &self,
        run: &mut Conversion<'_>,
        builder: &mut ClassBuilder,
        field: &FieldContext,
    ) -> Result<String> {
        let ty = field.ty();

        if let Some(doc) = &field.options.ts_doc {
            builder.add_doc(doc);
        }

        if let Some(transform) = &field.options.ts_transform {
            debug!(depth = run.depth(), field = %field.name.name, "transform field");
            let ts_type = match &field.options.ts_type {
                Some(ts_type) => ts_type.clone(),
                None => run.primitive_type(field, ty)?.to_string(),
            };
            builder.add_simple_field(&field.name, &ts_type, Some(transform));
            return Ok(String::new());
        }

        if run.is_enum(ty) {
            debug!(depth = run.depth(), field = %field.name.name, "enum field");
            let enum_name = run.enum_name(ty)?;
            builder.add_enum_field(&field.name, &enum_name);
            return Ok(String::new());
        }

        if let Some(ts_type) = &field.options.ts_type {
            debug!(
                depth = run.depth(),
                field = %field.name.name,
                ts_type = %ts_type,
                "field with explicit type"
            );
            builder.add_simple_field(&field.name, ts_type, None);
            return Ok(String::new());
        }

        match run.graph().kind(ty) {
            Kind::Struct => {
                debug!(depth = run.depth(), field = %field.name.name, "struct field");
                let deps = run.convert_type(ty)?;
                match run.type_name(ty) {
                    Some(class_name) => builder.add_struct_field(&field.name, &class_name),
                    None => builder.add_simple_field(&field.name, "any", None),
                }
                Ok(deps)
            }
            Kind::Map => {
                debug!(depth = run.depth(), field = %field.name.name, "map field");
                self.map_field(run, builder, field)
            }
            Kind::Slice | Kind::Array => {
                debug!(depth = run.depth(), field = %field.name.name, "array field");
                self.array_field(run, builder, field)
            }
            _ => {
                debug!(depth = run.depth(), field = %field.name.name, "simple field");
                let ts_type = run.primitive_type(field, ty)?;
                builder.add_simple_field(&field.name, ts_type, None);
                Ok(String::new())
            }
        }
    }

    fn name(&self) -> &str {
        "default"
    }
}

impl DefaultHandler {
    fn map_field(
        &self,
        run: &mut Conversion<'_>,
        builder: &mut ClassBuilder,
        field: &FieldContext,
    ) -> Result<String> {
        let graph = run.graph();
        let Some((key, value)) = graph.map_entry(field.ty()) else {
            return Err(run.no_mapping(field, Kind::Map));
        };

        let mut deps = Vec::new();
        let key_type = run.type_expression(key, field, &mut deps)?;
        let value_type = run.type_expression(value, field, &mut deps)?;

        let target = graph.deref(value);
        let hydrate = graph.kind(target) == Kind::Struct && run.type_name(target).is_some();
        builder.add_map_field(&field.name, &key_type, &value_type, hydrate);

        Ok(deps.join("\n"))
    }

    fn array_field(
        &self,
        run: &mut Conversion<'_>,
        builder: &mut ClassBuilder,
        field: &FieldContext,
    ) -> Result<String> {
        let graph = run.graph();
        let Some(mut elem) = graph.elem(field.ty()) else {
            return Err(run.no_mapping(field, graph.kind(field.ty())));
        };
        elem = graph.deref(elem);

        let mut depth = 1;
        while matches!(graph.kind(elem), Kind::Slice | Kind::Array) {
            match graph.elem(elem) {
                Some(inner) => elem = inner,
                None => break,
            }
            depth += 1;
        }
        elem = graph.deref(elem);

        if run.is_enum(elem) {
            let enum_name = run.enum_name(elem)?;
            builder.add_simple_array_field(&field.name, &enum_name, depth);
            return Ok(String::new());
        }

        if graph.kind(elem) == Kind::Struct {
            let deps = run.convert_type(elem)?;
            match run.type_name(elem) {
                Some(class_name) => {
                    builder.add_array_of_structs_field(&field.name, &class_name, depth)
                }
                None => builder.add_simple_array_field(&field.name, "any", depth),
            }
            return Ok(deps);
        }

        let mut deps = Vec::new();
        let elem_type = run.type_expression(elem, field, &mut deps)?;
        builder.add_simple_array_field(&field.name, &elem_type, depth);
        Ok(deps.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use tscriptify_ir::{EnumElement, TypeGraph};

    use super::*;
    use crate::{ConversionRegistry, ConverterOptions, Error, PreservedCode};

    struct Fixture {
        graph: TypeGraph,
        registry: ConversionRegistry,
        options: ConverterOptions,
        custom_code: PreservedCode,
        holder: TypeId,
    }

    impl Fixture {
        /// A `Holder` struct with a single field of type `ty`.
        fn new(ty: impl FnOnce(&mut TypeGraph) -> TypeId) -> Self {
            let mut graph = TypeGraph::new();
            let ty = ty(&mut graph);
            let holder = graph.struct_type("Holder", vec![Field::new("Value", ty)]);
            Self {
                graph,
                registry: ConversionRegistry::new(),
                options: ConverterOptions::new(),
                custom_code: PreservedCode::new(),
                holder,
            }
        }

        fn handle(&self, options: TypeOptions) -> (Result<String>, ClassBuilder) {
            let field = self.graph.fields(self.holder)[0].clone();
            let context = FieldContext {
                declaring: self.holder,
                field,
                name: WireName::required("value"),
                options,
            };
            let mut run = Conversion::new(
                &self.graph,
                &self.registry,
                &self.options,
                &self.custom_code,
            );
            let mut builder = ClassBuilder::new(false);
            let result = DefaultHandler.handle(&mut run, &mut builder, &context);
            (result, builder)
        }
    }

    #[test]
    fn test_transform_wins_over_enum_and_ts_type() {
        let mut fixture = Fixture::new(|g| g.named("Weekday", Kind::Int));
        let weekday = fixture.graph.lookup("Weekday").unwrap();
        fixture
            .registry
            .add_enum(weekday, vec![EnumElement::new(0i64, "Sunday")]);

        let options = TypeOptions::new()
            .with_ts_type("Day")
            .with_ts_transform("toDay(__VALUE__)");
        let (result, builder) = fixture.handle(options);
        assert_eq!(result.unwrap(), "");
        assert_eq!(builder.members(), ["value: Day;"]);
        assert_eq!(
            builder.initializers(),
            ["this.value = toDay(source[\"value\"]);"]
        );
    }

    #[test]
    fn test_enum_wins_over_ts_type() {
        let mut fixture = Fixture::new(|g| g.named("pkg.Weekday", Kind::Int));
        let weekday = fixture.graph.lookup("pkg.Weekday").unwrap();
        fixture
            .registry
            .add_enum(weekday, vec![EnumElement::new(0i64, "Sunday")]);

        let (_, builder) = fixture.handle(TypeOptions::new().with_ts_type("number"));
        assert_eq!(builder.members(), ["value: Weekday;"]);
    }

    #[test]
    fn test_doc_line() {
        let fixture = Fixture::new(|g| g.basic(Kind::Bool));
        let (_, builder) = fixture.handle(TypeOptions::new().with_ts_doc("Is it on?"));
        assert_eq!(builder.members(), ["/** Is it on? */", "value: boolean;"]);
    }

    #[test]
    fn test_struct_field_returns_dependency() {
        let fixture = Fixture::new(|g| {
            let int = g.basic(Kind::Int);
            g.struct_type("Point", vec![Field::new("X", int)])
        });
        let (result, builder) = fixture.handle(TypeOptions::new());
        assert!(result.unwrap().starts_with("export class Point {"));
        assert_eq!(builder.members(), ["value: Point;"]);
        assert!(builder.needs_convert_values());
    }

    #[test]
    fn test_nested_slices_collapse() {
        let fixture = Fixture::new(|g| {
            let int = g.basic(Kind::Int);
            let point = g.struct_type("Point", vec![Field::new("X", int)]);
            let ptr = g.pointer_to(point);
            let inner = g.slice_of(ptr);
            g.slice_of(inner)
        });
        let (result, builder) = fixture.handle(TypeOptions::new());
        assert!(result.unwrap().contains("class Point"));
        assert_eq!(builder.members(), ["value: Point[][];"]);
        assert_eq!(
            builder.initializers(),
            ["this.value = this.convertValues(source[\"value\"], Point);"]
        );
    }

    #[test]
    fn test_slice_of_enum() {
        let mut fixture = Fixture::new(|g| {
            let color = g.named("Color", Kind::String);
            g.slice_of(color)
        });
        let color = fixture.graph.lookup("Color").unwrap();
        fixture
            .registry
            .add_enum(color, vec![EnumElement::new("red", "Red")]);

        let (_, builder) = fixture.handle(TypeOptions::new());
        assert_eq!(builder.members(), ["value: Color[];"]);
        assert_eq!(builder.initializers(), ["this.value = source[\"value\"];"]);
    }

    #[test]
    fn test_map_of_struct_pointers_is_hydrated() {
        let fixture = Fixture::new(|g| {
            let string = g.basic(Kind::String);
            let point = g.struct_type("Point", vec![Field::new("Y", string)]);
            let ptr = g.pointer_to(point);
            g.map_of(string, ptr)
        });
        let (result, builder) = fixture.handle(TypeOptions::new());
        assert!(result.unwrap().contains("class Point"));
        assert_eq!(builder.members(), ["value: {[key: string]: Point};"]);
        assert_eq!(
            builder.initializers(),
            ["this.value = this.convertValues(source[\"value\"], Point, true);"]
        );
    }

    #[test]
    fn test_map_of_slices() {
        let fixture = Fixture::new(|g| {
            let string = g.basic(Kind::String);
            let strings = g.slice_of(string);
            g.map_of(string, strings)
        });
        let (_, builder) = fixture.handle(TypeOptions::new());
        assert_eq!(builder.members(), ["value: {[key: string]: string[]};"]);
        assert!(!builder.needs_convert_values());
    }

    #[test]
    fn test_unmapped_kind_fails() {
        let fixture = Fixture::new(|g| g.basic(Kind::Complex128));
        let (result, _) = fixture.handle(TypeOptions::new());
        assert!(matches!(
            result,
            Err(Error::NoMapping {
                kind: Kind::Complex128,
                ..
            })
        ));
    }

    #[test]
    fn test_ts_type_rescues_unmapped_kind() {
        let fixture = Fixture::new(|g| g.basic(Kind::Complex128));
        let (result, builder) = fixture.handle(TypeOptions::new().with_ts_type("string"));
        assert!(result.is_ok());
        assert_eq!(builder.members(), ["value: string;"]);
    }
}
