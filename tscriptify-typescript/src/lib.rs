//! TypeScript emitter for tscriptify.
//!
//! Walks a [`TypeGraph`](tscriptify_ir::TypeGraph) from the registered
//! types and emits one declaration per reachable struct: a class with a
//! hydrating constructor, or a plain interface. Registered value types
//! become enums.
//!
//! ```ignore
//! let mut converter = TypeScriptify::new(&model.graph).with_options(options);
//! converter.registry_mut().add_type(person);
//! converter.convert_to_file(Path::new("models.ts"))?;
//! ```
//!
//! Conversion of individual fields is pluggable through
//! [`TypeConversionHandler`]; [`DefaultHandler`] implements the built-in
//! rules and can be called from custom handlers.

pub mod ast;
mod class_builder;
mod converter;
mod error;
mod handler;
mod options;
mod registry;
mod resolver;

pub use class_builder::ClassBuilder;
pub use converter::{BANNER, Conversion, TypeScriptify, ts_primitive};
pub use error::{Error, Result};
pub use handler::{DefaultHandler, FieldContext, TypeConversionHandler};
pub use options::ConverterOptions;
pub use registry::{ConversionRegistry, StructType};
pub use resolver::{WireName, field_options, wire_name};
pub use tscriptify_core::{CamelCaseOptions, PreservedCode};
