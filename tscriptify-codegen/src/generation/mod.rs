//! Code generation outputs.
//!
//! - [`ImportCollector`] - Import line tracking and deduplication

mod imports;

pub use imports::ImportCollector;
