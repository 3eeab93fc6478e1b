//! Type model for the tscriptify generator.
//!
//! This crate provides the in-memory description of structured types that
//! the TypeScript emitter walks. Types live in a [`TypeGraph`] arena and are
//! referenced through stable [`TypeId`] handles, so recursive and cyclic
//! type graphs are expressible without shared ownership.
//!
//! # Architecture
//!
//! ```text
//! tscriptify.toml → tscriptify-manifest (parsing) → tscriptify-ir (TypeGraph) → tscriptify-typescript
//! ```

mod graph;
mod kind;
mod options;
mod tags;
mod value;

pub use graph::{Field, TypeDef, TypeGraph, TypeId, TypeShape};
pub use kind::Kind;
pub use options::{
    TAG_JSON, TAG_TS_DOC, TAG_TS_TRANSFORM, TAG_TS_TYPE, TRANSFORM_PLACEHOLDER, TypeOptions,
};
pub use tags::{Tag, TagError, Tags};
pub use value::{EnumElement, EnumValue};
