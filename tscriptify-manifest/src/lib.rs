//! tscriptify.toml parsing and validation.
//!
//! The manifest describes both the configuration of a generator run and the
//! structured types to convert. [`Manifest::lower`] turns it into a
//! [`tscriptify_ir::TypeGraph`] plus the list of roots, enums and overrides
//! to register on the converter.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod lower;
mod manifest;
mod type_expr;

pub use error::{Error, Result, SourceContext};
pub use lower::{EnumModel, Model, Root};
pub use manifest::{
    EnumDecl, EnumMember, FieldDecl, MANIFEST_FILE, Manifest, OutputConfig, OverrideDecl,
    ParseContext, TypeDecl, parse_manifest,
};
pub use type_expr::TypeExpr;
