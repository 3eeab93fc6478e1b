//! Type graph walker.

use std::{collections::HashSet, path::Path};

use tracing::{debug, info, warn};
use tscriptify_codegen::{CodeBuilder, Renderable};
use tscriptify_core::{OutputFile, PreservedCode, backup_file, load_preserved_code};
use tscriptify_ir::{EnumElement, Kind, TypeGraph, TypeId, TypeShape};

use crate::{
    ClassBuilder, ConversionRegistry, ConverterOptions, Error, FieldContext, Result,
    ast::{Declaration, Enum},
    resolver::{field_options, wire_name},
};

/// First line of every generated file.
pub const BANNER: &str =
    "/* Do not change, this code is generated from structured type definitions */";

/// TypeScript type of a basic kind, if it has one.
pub fn ts_primitive(kind: Kind) -> Option<&'static str> {
    match kind {
        Kind::Bool => Some("boolean"),
        Kind::Interface => Some("any"),
        Kind::Int
        | Kind::Int8
        | Kind::Int16
        | Kind::Int32
        | Kind::Int64
        | Kind::Uint
        | Kind::Uint8
        | Kind::Uint16
        | Kind::Uint32
        | Kind::Uint64
        | Kind::Float32
        | Kind::Float64 => Some("number"),
        Kind::String => Some("string"),
        _ => None,
    }
}

/// Converts the registered types of a [`TypeGraph`] into TypeScript.
///
/// # Example
///
/// ```
/// use tscriptify_ir::{Field, Kind, Tags, TypeGraph};
/// use tscriptify_typescript::{ConverterOptions, PreservedCode, TypeScriptify};
///
/// let mut graph = TypeGraph::new();
/// let string = graph.basic(Kind::String);
/// let tags: Tags = r#"json:"name""#.parse().unwrap();
/// let person = graph.struct_type("Person", vec![Field::new("Name", string).with_tags(tags)]);
///
/// let mut converter = TypeScriptify::new(&graph)
///     .with_options(ConverterOptions::new().with_interface(true));
/// converter.registry_mut().add_type(person);
///
/// let code = converter.convert(&PreservedCode::new()).unwrap();
/// assert_eq!(code, "export interface Person {\n    name: string;\n}\n");
/// ```
pub struct TypeScriptify<'g> {
    graph: &'g TypeGraph,
    registry: ConversionRegistry,
    options: ConverterOptions,
}

impl<'g> TypeScriptify<'g> {
    pub fn new(graph: &'g TypeGraph) -> Self {
        Self {
            graph,
            registry: ConversionRegistry::new(),
            options: ConverterOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConverterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_registry(mut self, registry: ConversionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    pub fn registry(&self) -> &ConversionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ConversionRegistry {
        &mut self.registry
    }

    /// Generate imports, enums and declarations.
    ///
    /// `custom_code` maps declaration names to code re-inserted between
    /// their preserved-code markers.
    pub fn convert(&self, custom_code: &PreservedCode) -> Result<String> {
        if self.options.create_from_method {
            warn!("the createFrom method is deprecated, the constructor does the same");
        }

        let mut run = Conversion::new(self.graph, &self.registry, &self.options, custom_code);
        let mut chunks = Vec::new();

        for (id, elements) in self.registry.enums() {
            let code = run.convert_enum(id, elements)?;
            if !code.is_empty() {
                chunks.push(code);
            }
        }

        for strct in self.registry.structs() {
            let code = run.convert_type(strct.id)?;
            if !code.is_empty() {
                chunks.push(code);
            }
        }

        let mut result = String::new();
        for import in self.registry.imports().iter() {
            result.push_str(import);
            result.push('\n');
        }
        if !result.is_empty() && !chunks.is_empty() {
            result.push('\n');
        }
        result.push_str(&chunks.join("\n"));
        Ok(result)
    }

    /// Regenerate `path`.
    ///
    /// The previous file is backed up (when a backup directory is set) and
    /// its preserved code is read back. The file is only written once the
    /// whole conversion succeeded.
    pub fn convert_to_file(&self, path: &Path) -> Result<()> {
        if let Some(dir) = &self.options.backup_dir
            && let Some(backup) = backup_file(path, dir).map_err(|e| Error::io(path, e))?
        {
            info!(backup = %backup.display(), "backed up previous output");
        }

        let custom_code = load_preserved_code(path).map_err(|e| Error::io(path, e))?;
        let code = self.convert(&custom_code)?;

        OutputFile::new(path, code)
            .with_header(BANNER)
            .write()
            .map_err(|e| Error::io(path, e))
    }
}

/// State of one conversion run.
///
/// Handlers receive it to look up names and to convert the types their
/// fields refer to. Each type is declared at most once per run.
pub struct Conversion<'a> {
    graph: &'a TypeGraph,
    registry: &'a ConversionRegistry,
    options: &'a ConverterOptions,
    custom_code: &'a PreservedCode,
    visited: HashSet<TypeId>,
    depth: usize,
}

impl<'a> Conversion<'a> {
    pub fn new(
        graph: &'a TypeGraph,
        registry: &'a ConversionRegistry,
        options: &'a ConverterOptions,
        custom_code: &'a PreservedCode,
    ) -> Self {
        Self {
            graph,
            registry,
            options,
            custom_code,
            visited: HashSet::new(),
            depth: 0,
        }
    }

    pub fn graph(&self) -> &'a TypeGraph {
        self.graph
    }

    pub fn registry(&self) -> &'a ConversionRegistry {
        self.registry
    }

    pub fn options(&self) -> &'a ConverterOptions {
        self.options
    }

    /// Nesting level of the type being converted.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_enum(&self, id: TypeId) -> bool {
        self.registry.is_enum(id)
    }

    pub fn is_converted(&self, id: TypeId) -> bool {
        self.visited.contains(&id)
    }

    /// Name of the class or interface declared for `id`.
    ///
    /// The registration name wins over the type's own name, of which only
    /// the part after the last `.` is used. Anonymous unregistered types
    /// have no name.
    pub fn type_name(&self, id: TypeId) -> Option<String> {
        self.registry
            .registered_name(id)
            .or_else(|| self.graph.name(id).map(display_name))
            .map(|name| self.options.entity_name(name))
    }

    /// Name of the enum declared for `id`.
    pub fn enum_name(&self, id: TypeId) -> Result<String> {
        self.graph
            .name(id)
            .map(|name| self.options.entity_name(display_name(name)))
            .ok_or(Error::UnnamedEnum)
    }

    /// Primitive TypeScript type of `ty`, or a no-mapping error for `field`.
    pub fn primitive_type(&self, field: &FieldContext, ty: TypeId) -> Result<&'static str> {
        let kind = self.graph.kind(ty);
        ts_primitive(kind).ok_or_else(|| self.no_mapping(field, kind))
    }

    pub fn no_mapping(&self, field: &FieldContext, kind: Kind) -> Error {
        Error::NoMapping {
            type_name: self
                .type_name(field.declaring)
                .unwrap_or_else(|| self.graph.type_string(field.declaring)),
            field: field.field.name.clone(),
            kind,
        }
    }

    /// TypeScript type expression for `id`, used for map keys, map values
    /// and array elements.
    ///
    /// Struct types are converted on the way; their declarations are pushed
    /// to `deps`.
    pub fn type_expression(
        &mut self,
        id: TypeId,
        field: &FieldContext,
        deps: &mut Vec<String>,
    ) -> Result<String> {
        if self.is_enum(id) {
            return self.enum_name(id);
        }

        let graph = self.graph;
        match graph.shape(id) {
            TypeShape::Pointer(elem) => self.type_expression(*elem, field, deps),
            TypeShape::Struct(_) => {
                let code = self.convert_type(id)?;
                if !code.is_empty() {
                    deps.push(code);
                }
                Ok(self.type_name(id).unwrap_or_else(|| "any".to_string()))
            }
            TypeShape::Slice(elem) | TypeShape::Array(elem, _) => {
                Ok(format!("{}[]", self.type_expression(*elem, field, deps)?))
            }
            TypeShape::Map { key, value } => {
                let key = self.type_expression(*key, field, deps)?;
                let value = self.type_expression(*value, field, deps)?;
                Ok(format!("{{[key: {}]: {}}}", key, value))
            }
            TypeShape::Basic(kind) => ts_primitive(*kind)
                .map(str::to_string)
                .ok_or_else(|| self.no_mapping(field, *kind)),
        }
    }

    /// Declaration of `id`, preceded by the declarations of the types it
    /// needs that were not converted yet.
    ///
    /// Returns an empty string for types already converted in this run,
    /// for anonymous types registered without a name and for non-struct
    /// types.
    pub fn convert_type(&mut self, id: TypeId) -> Result<String> {
        if !self.visited.insert(id) {
            return Ok(String::new());
        }

        let Some(name) = self.type_name(id) else {
            warn!(
                type_name = %self.graph.type_string(id),
                "anonymous type has no name, register it with a name; using any"
            );
            return Ok(String::new());
        };

        if self.graph.kind(id) != Kind::Struct {
            debug!(depth = self.depth, type_name = %name, "not a struct, nothing to declare");
            return Ok(String::new());
        }

        debug!(depth = self.depth, type_name = %name, "converting type");

        let mut builder = ClassBuilder::new(self.options.readonly_fields);
        let mut chunks = Vec::new();
        self.depth += 1;
        let converted = self.convert_fields(id, &mut builder, &mut chunks);
        self.depth -= 1;
        converted?;

        let declaration = self.declaration(name, &builder);
        chunks.push(self.render(&declaration));
        Ok(chunks.join("\n"))
    }

    fn convert_fields(
        &mut self,
        id: TypeId,
        builder: &mut ClassBuilder,
        chunks: &mut Vec<String>,
    ) -> Result<()> {
        for mut field in self.graph.deep_fields(id) {
            let is_ptr = self.graph.kind(field.ty) == Kind::Pointer;
            if is_ptr {
                field.ty = self.graph.deref(field.ty);
            }

            let Some(name) = wire_name(&field, is_ptr, self.options) else {
                debug!(depth = self.depth, field = %field.name, "field is not serialized, skipping");
                continue;
            };

            let options = field_options(self.registry, id, &field);
            let handler = self.registry.handler_for(id, field.ty);
            debug!(
                depth = self.depth,
                field = %name.name,
                handler = handler.name(),
                "converting field"
            );

            let context = FieldContext {
                declaring: id,
                field,
                name,
                options,
            };
            let deps = handler.handle(self, builder, &context)?;
            if !deps.is_empty() {
                chunks.push(deps);
            }
        }
        Ok(())
    }

    fn declaration(&self, name: String, builder: &ClassBuilder) -> Declaration {
        let options = self.options;
        let mut declaration = if options.create_interface {
            Declaration::interface(name)
        } else {
            Declaration::class(name)
        }
        .members(builder.members());

        if options.dont_export {
            declaration = declaration.private();
        }
        if options.create_from_method {
            declaration = declaration.create_from();
        }
        if options.emits_constructor() {
            declaration = declaration.constructor(builder.initializers());
        }
        if let Some(code) = self.custom_code.get(declaration.name()) {
            declaration = declaration.custom_code(code.as_str());
        }
        declaration
    }

    pub(crate) fn convert_enum(&mut self, id: TypeId, elements: &[EnumElement]) -> Result<String> {
        if !self.visited.insert(id) {
            return Ok(String::new());
        }
        let name = self.enum_name(id)?;
        debug!(depth = self.depth, enum_name = %name, "converting enum");

        let mut declaration = Enum::new(name).members(elements);
        if self.options.dont_export {
            declaration = declaration.private();
        }
        Ok(self.render(&declaration))
    }

    fn render(&self, node: &impl Renderable) -> String {
        let mut builder = CodeBuilder::new(self.options.indent.clone());
        builder.emit(node);
        builder.build()
    }
}

/// Part of a type name after its package qualifier.
fn display_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
