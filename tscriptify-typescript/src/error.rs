//! Conversion errors.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use tscriptify_ir::Kind;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run.
///
/// None of them leave partial output behind: the generated text is only
/// returned, or written, once every declaration has been built.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cannot find type for kind '{kind}' (field '{field}' of '{type_name}')")]
    #[diagnostic(
        code(tscriptify::no_mapping),
        help("add a ts_type tag to the field or register an override for its type")
    )]
    NoMapping {
        type_name: String,
        field: String,
        kind: Kind,
    },

    #[error("{message}")]
    #[diagnostic(code(tscriptify::handler))]
    Handler { message: String },

    #[error("enum value type has no name")]
    #[diagnostic(
        code(tscriptify::unnamed_enum),
        help("register enums on named types only")
    )]
    UnnamedEnum,

    #[error("failed to access '{path}'")]
    #[diagnostic(code(tscriptify::io))]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl Error {
    /// Failure reported by a custom conversion handler.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: eyre::Report) -> Self {
        Self::Io {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mapping_message() {
        let err = Error::NoMapping {
            type_name: "Person".to_string(),
            field: "Ch".to_string(),
            kind: Kind::Chan,
        };
        assert_eq!(
            err.to_string(),
            "cannot find type for kind 'chan' (field 'Ch' of 'Person')"
        );
    }

    #[test]
    fn test_handler_message_is_unchanged() {
        assert_eq!(Error::handler("boom").to_string(), "boom");
    }

    #[test]
    fn test_io_keeps_cause() {
        let err = Error::io("models.ts", eyre::eyre!("disk full"));
        assert_eq!(err.to_string(), "failed to access 'models.ts'");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "disk full");
    }
}
