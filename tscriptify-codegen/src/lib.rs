//! Text building blocks for the tscriptify generator.
//!
//! [`CodeBuilder`] writes [`Renderable`] nodes with consistent indentation;
//! [`generation::ImportCollector`] keeps import lines unique and ordered.

pub mod builder;
pub mod generation;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
