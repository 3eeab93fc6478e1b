//! Type graph arena.

use std::collections::HashMap;

use tracing::warn;

use crate::{Kind, TAG_JSON, Tag, Tags};

/// Stable handle of a type inside a [`TypeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A field of a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    pub tags: Tags,
    /// Embedded (anonymous) field whose own fields are promoted.
    pub embedded: bool,
    pub exported: bool,
}

impl Field {
    /// Create a field; it is exported when its name starts with an uppercase letter.
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        let name = name.into();
        let exported = name.chars().next().is_some_and(char::is_uppercase);
        Self {
            name,
            ty,
            tags: Tags::new(),
            embedded: false,
            exported,
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }
}

/// Structure of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Basic(Kind),
    Struct(Vec<Field>),
    Slice(TypeId),
    Array(TypeId, usize),
    Map { key: TypeId, value: TypeId },
    Pointer(TypeId),
}

impl TypeShape {
    pub fn kind(&self) -> Kind {
        match self {
            TypeShape::Basic(kind) => *kind,
            TypeShape::Struct(_) => Kind::Struct,
            TypeShape::Slice(_) => Kind::Slice,
            TypeShape::Array(..) => Kind::Array,
            TypeShape::Map { .. } => Kind::Map,
            TypeShape::Pointer(_) => Kind::Pointer,
        }
    }
}

/// A type stored in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: Option<String>,
    pub shape: TypeShape,
}

/// Interning key for unnamed non-struct types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ShapeKey {
    Basic(Kind),
    Slice(TypeId),
    Array(TypeId, usize),
    Map(TypeId, TypeId),
    Pointer(TypeId),
}

/// Arena of types referenced by [`TypeId`].
///
/// Unnamed basic, slice, array, map and pointer types are interned, so two
/// requests for `[]*Person` yield the same handle. Named types are declared
/// first and defined later, which makes cycles such as `A -> *B -> A`
/// expressible.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    types: Vec<TypeDef>,
    by_name: HashMap<String, TypeId>,
    interned: HashMap<ShapeKey, TypeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(def);
        id
    }

    fn intern(&mut self, key: ShapeKey, shape: TypeShape) -> TypeId {
        if let Some(id) = self.interned.get(&key) {
            return *id;
        }
        let id = self.push(TypeDef { name: None, shape });
        self.interned.insert(key, id);
        id
    }

    /// Unnamed basic type of the given kind.
    pub fn basic(&mut self, kind: Kind) -> TypeId {
        self.intern(ShapeKey::Basic(kind), TypeShape::Basic(kind))
    }

    pub fn slice_of(&mut self, elem: TypeId) -> TypeId {
        self.intern(ShapeKey::Slice(elem), TypeShape::Slice(elem))
    }

    pub fn array_of(&mut self, elem: TypeId, len: usize) -> TypeId {
        self.intern(ShapeKey::Array(elem, len), TypeShape::Array(elem, len))
    }

    pub fn map_of(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(ShapeKey::Map(key, value), TypeShape::Map { key, value })
    }

    pub fn pointer_to(&mut self, elem: TypeId) -> TypeId {
        self.intern(ShapeKey::Pointer(elem), TypeShape::Pointer(elem))
    }

    /// Declare a named type, returning the existing handle if already declared.
    ///
    /// Until [`define`](Self::define) is called the type is an empty struct.
    pub fn declare(&mut self, name: impl Into<String>) -> TypeId {
        let name = name.into();
        if let Some(id) = self.by_name.get(&name) {
            return *id;
        }
        let id = self.push(TypeDef {
            name: Some(name.clone()),
            shape: TypeShape::Struct(Vec::new()),
        });
        self.by_name.insert(name, id);
        id
    }

    /// Set the shape of a declared type.
    pub fn define(&mut self, id: TypeId, shape: TypeShape) {
        self.types[id.0].shape = shape;
    }

    /// Named type with the given shape.
    pub fn named_type(&mut self, name: impl Into<String>, shape: TypeShape) -> TypeId {
        let id = self.declare(name);
        self.define(id, shape);
        id
    }

    /// Named basic type (e.g. `type Weekday int`).
    pub fn named(&mut self, name: impl Into<String>, kind: Kind) -> TypeId {
        self.named_type(name, TypeShape::Basic(kind))
    }

    pub fn struct_type(&mut self, name: impl Into<String>, fields: Vec<Field>) -> TypeId {
        self.named_type(name, TypeShape::Struct(fields))
    }

    /// A struct without a name. Every call creates a distinct type.
    pub fn anonymous_struct(&mut self, fields: Vec<Field>) -> TypeId {
        self.push(TypeDef {
            name: None,
            shape: TypeShape::Struct(fields),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0]
    }

    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.get(id).name.as_deref()
    }

    pub fn shape(&self, id: TypeId) -> &TypeShape {
        &self.get(id).shape
    }

    pub fn kind(&self, id: TypeId) -> Kind {
        self.shape(id).kind()
    }

    /// Pointee of a pointer, element of a slice or array.
    pub fn elem(&self, id: TypeId) -> Option<TypeId> {
        match self.shape(id) {
            TypeShape::Pointer(elem) | TypeShape::Slice(elem) | TypeShape::Array(elem, _) => {
                Some(*elem)
            }
            _ => None,
        }
    }

    /// Key and value of a map.
    pub fn map_entry(&self, id: TypeId) -> Option<(TypeId, TypeId)> {
        match self.shape(id) {
            TypeShape::Map { key, value } => Some((*key, *value)),
            _ => None,
        }
    }

    /// Strip one level of pointer.
    pub fn deref(&self, id: TypeId) -> TypeId {
        match self.shape(id) {
            TypeShape::Pointer(elem) => *elem,
            _ => id,
        }
    }

    /// Direct fields of a struct, empty for other shapes.
    pub fn fields(&self, id: TypeId) -> &[Field] {
        match self.shape(id) {
            TypeShape::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Number of types in the graph.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Human readable rendering such as `[]*models.Person`.
    pub fn type_string(&self, id: TypeId) -> String {
        let def = self.get(id);
        if let Some(name) = &def.name {
            return name.clone();
        }
        match &def.shape {
            TypeShape::Basic(Kind::Interface) => "interface {}".to_string(),
            TypeShape::Basic(kind) => kind.as_str().to_string(),
            TypeShape::Slice(elem) => format!("[]{}", self.type_string(*elem)),
            TypeShape::Array(elem, len) => format!("[{}]{}", len, self.type_string(*elem)),
            TypeShape::Map { key, value } => format!(
                "map[{}]{}",
                self.type_string(*key),
                self.type_string(*value)
            ),
            TypeShape::Pointer(elem) => format!("*{}", self.type_string(*elem)),
            TypeShape::Struct(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{} {}", f.name, self.type_string(f.ty)))
                    .collect();
                format!("struct {{ {} }}", fields.join("; "))
            }
        }
    }

    /// All fields of a struct with embedded structs flattened in place.
    ///
    /// A pointer is followed once. Embedding by value or by pointer both
    /// promote the embedded struct's fields, recursively.
    pub fn deep_fields(&self, id: TypeId) -> Vec<Field> {
        let mut fields = Vec::new();
        let mut path = Vec::new();
        self.collect_fields(self.deref(id), &mut path, &mut fields);
        fields
    }

    fn collect_fields(&self, id: TypeId, path: &mut Vec<TypeId>, out: &mut Vec<Field>) {
        if self.kind(id) != Kind::Struct || path.contains(&id) {
            return;
        }
        path.push(id);
        for field in self.fields(id) {
            let target = self.deref(field.ty);
            if field.embedded && self.kind(target) == Kind::Struct {
                self.collect_fields(target, path, out);
            } else {
                out.push(field.clone());
            }
        }
        path.pop();
    }

    /// New anonymous struct whose `json` tags carry exactly `options`.
    ///
    /// Fields without a `json` tag are kept unchanged.
    pub fn tag_all(&mut self, id: TypeId, options: &[&str]) -> TypeId {
        let mut fields = self.fields(id).to_vec();
        for field in &mut fields {
            match field.tags.get(TAG_JSON).cloned() {
                Some(tag) => field.tags.set(tag.with_options(options.iter().copied())),
                None => warn!(field = %field.name, "field has no json tag, leaving it untouched"),
            }
        }
        self.anonymous_struct(fields)
    }

    /// New anonymous struct with `tags` set on the named fields.
    pub fn add_field_tags(&mut self, id: TypeId, tags: &HashMap<String, Vec<Tag>>) -> TypeId {
        let mut fields = self.fields(id).to_vec();
        for field in &mut fields {
            if let Some(new_tags) = tags.get(&field.name) {
                for tag in new_tags {
                    field.tags.set(tag.clone());
                }
            }
        }
        self.anonymous_struct(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(name: &str, ty: TypeId, tags: &str) -> Field {
        Field::new(name, ty).with_tags(Tags::parse(tags).unwrap())
    }

    #[test]
    fn test_interning() {
        let mut graph = TypeGraph::new();
        let string = graph.basic(Kind::String);
        let a = graph.slice_of(string);
        let b = graph.slice_of(string);
        assert_eq!(a, b);
        assert_ne!(graph.array_of(string, 2), graph.array_of(string, 3));
        assert_eq!(graph.basic(Kind::String), string);
    }

    #[test]
    fn test_declare_then_define_allows_cycles() {
        let mut graph = TypeGraph::new();
        let node = graph.declare("Node");
        let next = graph.pointer_to(node);
        graph.define(node, TypeShape::Struct(vec![Field::new("Next", next)]));

        assert_eq!(graph.lookup("Node"), Some(node));
        assert_eq!(graph.declare("Node"), node);
        assert_eq!(graph.fields(node)[0].ty, next);
        assert_eq!(graph.deref(next), node);
        assert_eq!(graph.kind(next), Kind::Pointer);
    }

    #[test]
    fn test_type_string() {
        let mut graph = TypeGraph::new();
        let person = graph.struct_type("models.Person", vec![]);
        let ptr = graph.pointer_to(person);
        let slice = graph.slice_of(ptr);
        let string = graph.basic(Kind::String);
        let map = graph.map_of(string, slice);
        assert_eq!(graph.type_string(map), "map[string][]*models.Person");
        assert_eq!(graph.map_entry(map), Some((string, slice)));
        assert_eq!(graph.map_entry(slice), None);

        let any = graph.basic(Kind::Interface);
        let arr = graph.array_of(any, 4);
        assert_eq!(graph.type_string(arr), "[4]interface {}");
    }

    #[test]
    fn test_exported_from_name() {
        let mut graph = TypeGraph::new();
        let int = graph.basic(Kind::Int);
        assert!(Field::new("Public", int).exported);
        assert!(!Field::new("private", int).exported);
    }

    #[test]
    fn test_deep_fields_flattens_embedded() {
        let mut graph = TypeGraph::new();
        let string = graph.basic(Kind::String);
        let base = graph.struct_type("Base", vec![Field::new("ID", string)]);
        let audit = graph.struct_type("Audit", vec![Field::new("By", string)]);
        let audit_ptr = graph.pointer_to(audit);
        let user = graph.struct_type(
            "User",
            vec![
                Field::new("Base", base).embedded(),
                Field::new("Name", string),
                Field::new("Audit", audit_ptr).embedded(),
            ],
        );

        let names: Vec<String> = graph
            .deep_fields(user)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["ID", "Name", "By"]);

        let user_ptr = graph.pointer_to(user);
        assert_eq!(graph.deep_fields(user_ptr).len(), 3);
    }

    #[test]
    fn test_deep_fields_self_embedding_terminates() {
        let mut graph = TypeGraph::new();
        let string = graph.basic(Kind::String);
        let node = graph.declare("Node");
        let node_ptr = graph.pointer_to(node);
        graph.define(
            node,
            TypeShape::Struct(vec![
                Field::new("Node", node_ptr).embedded(),
                Field::new("Value", string),
            ]),
        );
        let names: Vec<String> = graph
            .deep_fields(node)
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["Value"]);
    }

    #[test]
    fn test_deep_fields_of_non_struct_is_empty() {
        let mut graph = TypeGraph::new();
        let int = graph.basic(Kind::Int);
        assert!(graph.deep_fields(int).is_empty());
    }

    #[test]
    fn test_tag_all() {
        let mut graph = TypeGraph::new();
        let string = graph.basic(Kind::String);
        let person = graph.struct_type(
            "Person",
            vec![
                tagged("Name", string, r#"json:"name" ts_doc:"Full name""#),
                Field::new("Plain", string),
            ],
        );

        let optional = graph.tag_all(person, &["omitempty"]);

        assert_ne!(optional, person);
        assert_eq!(graph.name(optional), None);
        let fields = graph.fields(optional);
        assert_eq!(
            fields[0].tags.to_string(),
            r#"json:"name,omitempty" ts_doc:"Full name""#
        );
        assert!(fields[1].tags.is_empty());
        // The original type is left alone.
        assert_eq!(graph.fields(person)[0].tags.value("json").as_deref(), Some("name"));
    }

    #[test]
    fn test_add_field_tags() {
        let mut graph = TypeGraph::new();
        let string = graph.basic(Kind::String);
        let person = graph.struct_type(
            "Person",
            vec![
                tagged("Name", string, r#"json:"name""#),
                Field::new("Born", string),
            ],
        );

        let mut tags = HashMap::new();
        tags.insert(
            "Born".to_string(),
            vec![Tag::new("ts_type", "Date"), Tag::new("json", "born")],
        );
        let extended = graph.add_field_tags(person, &tags);

        let fields = graph.fields(extended);
        assert_eq!(fields[0].tags.to_string(), r#"json:"name""#);
        assert_eq!(fields[1].tags.to_string(), r#"ts_type:"Date" json:"born""#);
    }
}
