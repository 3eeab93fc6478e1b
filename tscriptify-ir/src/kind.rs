//! Type kinds.

use std::fmt;

/// Primitive or structural category of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Interface,
    Struct,
    Slice,
    Array,
    Map,
    Pointer,
    Chan,
    Func,
}

impl Kind {
    /// Get the lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uintptr => "uintptr",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::String => "string",
            Kind::Interface => "interface",
            Kind::Struct => "struct",
            Kind::Slice => "slice",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Pointer => "ptr",
            Kind::Chan => "chan",
            Kind::Func => "func",
        }
    }

    /// Resolve a predeclared basic type name (`int`, `byte`, `any`, ...).
    pub fn from_basic_name(name: &str) -> Option<Kind> {
        let kind = match name {
            "bool" => Kind::Bool,
            "int" => Kind::Int,
            "int8" => Kind::Int8,
            "int16" => Kind::Int16,
            "int32" | "rune" => Kind::Int32,
            "int64" => Kind::Int64,
            "uint" => Kind::Uint,
            "uint8" | "byte" => Kind::Uint8,
            "uint16" => Kind::Uint16,
            "uint32" => Kind::Uint32,
            "uint64" => Kind::Uint64,
            "uintptr" => Kind::Uintptr,
            "float32" => Kind::Float32,
            "float64" => Kind::Float64,
            "complex64" => Kind::Complex64,
            "complex128" => Kind::Complex128,
            "string" => Kind::String,
            "any" | "interface{}" => Kind::Interface,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns true for kinds that carry no element or field types.
    pub fn is_basic(&self) -> bool {
        !matches!(
            self,
            Kind::Struct | Kind::Slice | Kind::Array | Kind::Map | Kind::Pointer
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_basic_name_aliases() {
        assert_eq!(Kind::from_basic_name("byte"), Some(Kind::Uint8));
        assert_eq!(Kind::from_basic_name("rune"), Some(Kind::Int32));
        assert_eq!(Kind::from_basic_name("any"), Some(Kind::Interface));
        assert_eq!(Kind::from_basic_name("interface{}"), Some(Kind::Interface));
        assert_eq!(Kind::from_basic_name("Person"), None);
    }

    #[test]
    fn test_is_basic() {
        assert!(Kind::String.is_basic());
        assert!(Kind::Chan.is_basic());
        assert!(!Kind::Map.is_basic());
        assert!(!Kind::Pointer.is_basic());
    }

    #[test]
    fn test_display() {
        assert_eq!(Kind::Pointer.to_string(), "ptr");
        assert_eq!(Kind::Complex128.to_string(), "complex128");
    }
}
