use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use tscriptify_ir::TagError;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create a reserved keyword error.
    pub fn reserved_keyword_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedKeyword {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidIdentifier {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
            reason: reason.into(),
        })
    }

    /// Create a duplicate name error.
    pub fn duplicate_error(
        &self,
        name: impl Into<String>,
        first_span: Option<SourceSpan>,
        second_span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateName {
            src: self.named_source(),
            first_span,
            second_span,
            name: name.into(),
        })
    }

    /// Create an unknown type error.
    pub fn unknown_type_error(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownType {
            src: self.named_source(),
            span,
            name: name.into(),
            context: context.into(),
        })
    }

    /// Create a malformed type expression error.
    pub fn type_expr_error(
        &self,
        expr: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidTypeExpr {
            src: self.named_source(),
            span,
            expr: expr.into(),
            reason: reason.into(),
        })
    }

    /// Create a malformed tag error.
    pub fn tag_error(
        &self,
        field: impl Into<String>,
        source: TagError,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidTag {
            src: self.named_source(),
            span,
            field: field.into(),
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a tscriptify.toml or pass its location with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tscriptify.toml")]
    #[diagnostic(code(tscriptify::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate type name '{name}'")]
    #[diagnostic(
        code(tscriptify::duplicate_name),
        help("types and enums share one namespace, rename one of them")
    )]
    DuplicateName {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("declared again here")]
        second_span: Option<SourceSpan>,
        name: String,
    },

    #[error("unknown type '{name}' in {context}")]
    #[diagnostic(
        code(tscriptify::unknown_type),
        help("declare it under [[types]] or [[enums]], or use a basic type such as string, int64 or bool")
    )]
    UnknownType {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("malformed type expression '{expr}': {reason}")]
    #[diagnostic(
        code(tscriptify::invalid_type),
        help("valid forms are: Name, *T, []T, [N]T, map[K]V")
    )]
    InvalidTypeExpr {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: Option<SourceSpan>,
        expr: String,
        reason: String,
    },

    #[error("invalid tag on field '{field}'")]
    #[diagnostic(
        code(tscriptify::invalid_tag),
        help("tags look like: json:\"name,omitempty\" ts_type:\"Date\"")
    )]
    InvalidTag {
        #[source_code]
        src: NamedSource<String>,
        #[label("malformed tag")]
        span: Option<SourceSpan>,
        field: String,
        #[source]
        source: TagError,
    },

    #[error("{message}")]
    #[diagnostic(code(tscriptify::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("'{name}' is a TypeScript reserved word")]
    #[diagnostic(help("rename '{name}' or give it a different ts_name"))]
    ReservedKeyword {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved word used here")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
    },

    #[error("invalid {context} name '{name}'")]
    #[diagnostic(help(
        "{reason}. Use only letters, numbers, and underscores, starting with a letter or underscore."
    ))]
    InvalidIdentifier {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid identifier")]
        span: Option<SourceSpan>,
        name: String,
        context: String,
        reason: String,
    },

    #[error("{message}")]
    #[diagnostic(code(tscriptify::model_error))]
    Model { message: String },
}

impl Error {
    /// Create an error for a manifest that is lowered without its source text.
    pub fn model(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Model {
            message: message.into(),
        })
    }
}
