//! Core utilities for the tscriptify generator.
//!
//! This crate holds the pieces that don't know anything about type graphs:
//! identifier casing, writing output files, backing up previous output and
//! reading back hand-written code preserved between regenerations.

mod backup;
mod file;
mod preserved;
mod utils;

// File operations
pub use backup::{backup_file, backup_file_name};
pub use file::{OutputFile, write_file};
pub use preserved::{
    PRESERVED_END, PreservedCode, load_preserved_code, parse_preserved_code, preserved_start,
};
// String utilities
pub use utils::{CamelCaseOptions, camel_case};
