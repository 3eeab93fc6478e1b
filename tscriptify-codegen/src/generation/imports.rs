//! Import line collection.

use indexmap::IndexSet;

/// Tracks verbatim import lines and deduplicates them.
///
/// Maintains insertion order for deterministic output.
///
/// # Example
///
/// ```
/// use tscriptify_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("import { Decimal } from 'decimal.js';");
/// imports.add("import { Decimal } from 'decimal.js';");
/// imports.add("import * as dayjs from 'dayjs';");
///
/// assert_eq!(imports.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    lines: IndexSet<String>,
}

impl ImportCollector {
    /// Create a new empty import collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an import line. Adding a line already present is a no-op.
    pub fn add(&mut self, line: &str) {
        if !self.lines.contains(line) {
            self.lines.insert(line.to_string());
        }
    }

    /// Check if a line is already collected.
    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }

    /// Iterate over all lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
