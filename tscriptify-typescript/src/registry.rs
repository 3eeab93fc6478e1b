//! What to convert and how.

use std::{collections::HashMap, sync::Arc};

use indexmap::IndexMap;
use tscriptify_codegen::generation::ImportCollector;
use tscriptify_ir::{EnumElement, TypeId, TypeOptions};

use crate::{DefaultHandler, TypeConversionHandler};

/// A struct type registered for conversion.
#[derive(Clone)]
pub struct StructType {
    pub id: TypeId,
    /// Name written in the output instead of the type's own name
    pub name: Option<String>,
    field_options: IndexMap<TypeId, TypeOptions>,
    type_handlers: IndexMap<TypeId, Arc<dyn TypeConversionHandler>>,
}

impl StructType {
    pub fn new(id: TypeId) -> Self {
        Self {
            id,
            name: None,
            field_options: IndexMap::new(),
            type_handlers: IndexMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Override options of every field of type `ty` inside this struct.
    pub fn with_field_options(mut self, ty: TypeId, options: TypeOptions) -> Self {
        self.field_options.insert(ty, options);
        self
    }

    /// Convert every field of type `ty` inside this struct with `handler`.
    pub fn with_type_handler(
        mut self,
        ty: TypeId,
        handler: impl TypeConversionHandler + 'static,
    ) -> Self {
        self.type_handlers.insert(ty, Arc::new(handler));
        self
    }

    pub fn field_options(&self, ty: TypeId) -> Option<&TypeOptions> {
        self.field_options.get(&ty)
    }

    pub fn type_handler(&self, ty: TypeId) -> Option<&Arc<dyn TypeConversionHandler>> {
        self.type_handlers.get(&ty)
    }
}

impl std::fmt::Debug for StructType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("field_options", &self.field_options)
            .field("type_handlers", &self.type_handlers.len())
            .finish()
    }
}

/// Registered roots, enums, overrides and handlers.
///
/// Filled before a run and only read while converting.
pub struct ConversionRegistry {
    structs: Vec<StructType>,
    enums: IndexMap<TypeId, Vec<EnumElement>>,
    field_type_options: HashMap<TypeId, TypeOptions>,
    type_handlers: HashMap<TypeId, Arc<dyn TypeConversionHandler>>,
    default_handler: Arc<dyn TypeConversionHandler>,
    imports: ImportCollector,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self {
            structs: Vec::new(),
            enums: IndexMap::new(),
            field_type_options: HashMap::new(),
            type_handlers: HashMap::new(),
            default_handler: Arc::new(DefaultHandler),
            imports: ImportCollector::new(),
        }
    }
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_struct(&mut self, strct: StructType) -> &mut Self {
        self.structs.push(strct);
        self
    }

    pub fn add_type(&mut self, id: TypeId) -> &mut Self {
        self.add_struct(StructType::new(id))
    }

    /// Register a type under an explicit name. Required for anonymous structs.
    pub fn add_type_with_name(&mut self, id: TypeId, name: impl Into<String>) -> &mut Self {
        self.add_struct(StructType::new(id).with_name(name))
    }

    /// Render `id` as an enum. Registering the same type again replaces its members.
    pub fn add_enum(&mut self, id: TypeId, elements: Vec<EnumElement>) -> &mut Self {
        self.enums.insert(id, elements);
        self
    }

    /// Override options of every field of type `ty`, in every struct.
    pub fn manage_type(&mut self, ty: TypeId, options: TypeOptions) -> &mut Self {
        self.field_type_options.insert(ty, options);
        self
    }

    /// Convert every field declared in one of `declaring` with `handler`.
    pub fn manage_type_conversion(
        &mut self,
        handler: impl TypeConversionHandler + 'static,
        declaring: &[TypeId],
    ) -> &mut Self {
        let handler: Arc<dyn TypeConversionHandler> = Arc::new(handler);
        for id in declaring {
            self.type_handlers.insert(*id, Arc::clone(&handler));
        }
        self
    }

    pub fn with_default_handler(
        &mut self,
        handler: impl TypeConversionHandler + 'static,
    ) -> &mut Self {
        self.default_handler = Arc::new(handler);
        self
    }

    pub fn add_import(&mut self, line: &str) -> &mut Self {
        self.imports.add(line);
        self
    }

    pub fn structs(&self) -> &[StructType] {
        &self.structs
    }

    pub fn enums(&self) -> impl Iterator<Item = (TypeId, &[EnumElement])> {
        self.enums.iter().map(|(id, elements)| (*id, elements.as_slice()))
    }

    pub fn is_enum(&self, id: TypeId) -> bool {
        self.enums.contains_key(&id)
    }

    pub fn managed_type(&self, ty: TypeId) -> Option<&TypeOptions> {
        self.field_type_options.get(&ty)
    }

    pub fn imports(&self) -> &ImportCollector {
        &self.imports
    }

    /// Name given at registration, if any registration of `id` carries one.
    pub fn registered_name(&self, id: TypeId) -> Option<&str> {
        self.structs
            .iter()
            .filter(|s| s.id == id)
            .find_map(|s| s.name.as_deref())
    }

    /// Handler for a field of type `ty` declared in `declaring`.
    ///
    /// A struct-specific handler for the field type wins over a handler
    /// registered for the declaring type, which wins over the default.
    pub fn handler_for(&self, declaring: TypeId, ty: TypeId) -> Arc<dyn TypeConversionHandler> {
        self.structs
            .iter()
            .filter(|s| s.id == declaring)
            .find_map(|s| s.type_handler(ty))
            .or_else(|| self.type_handlers.get(&declaring))
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::clone(&self.default_handler))
    }
}
