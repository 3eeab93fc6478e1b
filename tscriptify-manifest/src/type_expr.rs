//! Type expressions used in field and override declarations.
//!
//! ```text
//! expr := name | "*" expr | "[]" expr | "[" digits "]" expr | "map[" expr "]" expr
//! ```

use std::{fmt, str::FromStr};

/// Parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A basic type (`int64`, `any`) or a declared type name (`time.Time`).
    Named(String),
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array(usize, Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    /// Parse an expression, returning a short reason on failure.
    pub fn parse(text: &str) -> Result<Self, &'static str> {
        let text = text.trim();
        if text.is_empty() {
            return Err("empty type");
        }

        if let Some(rest) = text.strip_prefix('*') {
            return Ok(TypeExpr::Pointer(Box::new(Self::parse(rest)?)));
        }
        if let Some(rest) = text.strip_prefix("[]") {
            return Ok(TypeExpr::Slice(Box::new(Self::parse(rest)?)));
        }
        if let Some(rest) = text.strip_prefix("map[") {
            let close = matching_bracket(rest).ok_or("unclosed '[' in map key")?;
            let key = Self::parse(&rest[..close])?;
            let value = Self::parse(&rest[close + 1..])?;
            return Ok(TypeExpr::Map(Box::new(key), Box::new(value)));
        }
        if let Some(rest) = text.strip_prefix('[') {
            let close = rest.find(']').ok_or("unclosed '[' in array length")?;
            let len = rest[..close]
                .trim()
                .parse::<usize>()
                .map_err(|_| "array length must be a non-negative integer")?;
            return Ok(TypeExpr::Array(len, Box::new(Self::parse(&rest[close + 1..])?)));
        }

        if text == "interface{}" || is_qualified_name(text) {
            Ok(TypeExpr::Named(text.to_string()))
        } else {
            Err("expected a type name")
        }
    }

    /// Every type name the expression mentions, outermost first.
    pub fn names(&self) -> Vec<&str> {
        match self {
            TypeExpr::Named(name) => vec![name.as_str()],
            TypeExpr::Pointer(inner) | TypeExpr::Slice(inner) | TypeExpr::Array(_, inner) => {
                inner.names()
            }
            TypeExpr::Map(key, value) => {
                let mut names = key.names();
                names.extend(value.names());
                names
            }
        }
    }
}

/// Position of the `]` closing an already opened `[`.
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_qualified_name(s: &str) -> bool {
    s.split('.').all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_')
    })
}

impl FromStr for TypeExpr {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(inner) => write!(f, "[]{}", inner),
            TypeExpr::Array(len, inner) => write!(f, "[{}]{}", len, inner),
            TypeExpr::Map(key, value) => write!(f, "map[{}]{}", key, value),
        }
    }
}
