//! Core operations.
//!
//! This module contains the business logic for tscriptify commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod convert;
pub mod generate;

pub use check::check;
pub use convert::Overrides;
pub use generate::generate;
