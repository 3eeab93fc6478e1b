//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// This struct encapsulates the source content, filename, and current path
/// through the manifest hierarchy, making it easier to pass validation
/// context through nested declarations.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "tscriptify.toml");
/// ctx.validate_name("Person", "type")?;
///
/// // For nested validation
/// let nested = ctx.push("Person");
/// nested.validate_field_name("Name")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["Person"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        self.source.src()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'Person'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Find the span of a declared name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.source.src(), name, 0)
    }

    /// Find the span of a quoted value in the source.
    pub fn find_value_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), value)
    }

    /// Validate a type, enum or enum member name.
    ///
    /// Checks for TypeScript reserved words and valid identifier format.
    /// Dotted names (`time.Time`) are accepted; the last segment is what
    /// ends up in the generated code.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        let display = name.rsplit('.').next().unwrap_or(name);
        if is_reserved_word(display) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = name.split('.').find_map(validate_identifier) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }

    /// Validate a struct field name. Reserved words are fine as field names.
    pub fn validate_field_name(&self, name: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for("field"),
                reason,
                self.find_span(name),
            ));
        }
        Ok(())
    }
}

/// TypeScript reserved words that cannot name a class, interface or enum
pub(crate) const TS_RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
    // Strict mode
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
    // Predefined type names
    "any", "boolean", "number", "string", "symbol", "never", "unknown", "object",
];

/// Check if a name is a TypeScript reserved word
pub(crate) fn is_reserved_word(name: &str) -> bool {
    TS_RESERVED_WORDS.contains(&name)
}

/// Find the span of the `nth` declaration `name = "<name>"` in the TOML source.
pub(crate) fn find_name_span(src: &str, name: &str, nth: usize) -> Option<SourceSpan> {
    let patterns = [
        format!("name = \"{}\"", name),
        format!("name = '{}'", name),
        format!("name=\"{}\"", name),
    ];

    for pattern in &patterns {
        if let Some((pos, _)) = src.match_indices(pattern.as_str()).nth(nth) {
            // Skip up to and including the opening quote
            let start = pos + pattern.len() - name.len() - 1;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    None
}

/// Find the span of a quoted TOML string value (inside the quotes).
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    [format!("\"{}\"", value), format!("'{}'", value)]
        .iter()
        .find_map(|pattern| src.find(pattern.as_str()))
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}

/// Validate that a name is a valid identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}
