//! Per-field conversion options.

use crate::Tags;

/// Tag carrying the wire name and `omitempty` / `-` markers.
pub const TAG_JSON: &str = "json";
/// Tag carrying an explicit TypeScript type.
pub const TAG_TS_TYPE: &str = "ts_type";
/// Tag carrying a transform expression.
pub const TAG_TS_TRANSFORM: &str = "ts_transform";
/// Tag carrying a doc comment.
pub const TAG_TS_DOC: &str = "ts_doc";

/// Placeholder replaced by the raw source expression in transforms.
pub const TRANSFORM_PLACEHOLDER: &str = "__VALUE__";

/// Override bundle for a field. `None` means "no override".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOptions {
    pub ts_type: Option<String>,
    pub ts_doc: Option<String>,
    pub ts_transform: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.is_empty()).then_some(value)
}

impl TypeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options declared on a field through `ts_*` tags.
    pub fn from_tags(tags: &Tags) -> Self {
        Self {
            ts_type: tags.value(TAG_TS_TYPE),
            ts_doc: tags.value(TAG_TS_DOC),
            ts_transform: tags.value(TAG_TS_TRANSFORM),
        }
    }

    pub fn with_ts_type(mut self, ts_type: impl Into<String>) -> Self {
        self.ts_type = non_empty(ts_type);
        self
    }

    pub fn with_ts_doc(mut self, ts_doc: impl Into<String>) -> Self {
        self.ts_doc = non_empty(ts_doc);
        self
    }

    pub fn with_ts_transform(mut self, ts_transform: impl Into<String>) -> Self {
        self.ts_transform = non_empty(ts_transform);
        self
    }

    /// Apply an override: its non-empty `ts_type` and `ts_transform` win.
    ///
    /// `ts_doc` never participates in overriding.
    pub fn apply_override(&mut self, other: &TypeOptions) {
        if let Some(ts_transform) = &other.ts_transform {
            self.ts_transform = Some(ts_transform.clone());
        }
        if let Some(ts_type) = &other.ts_type {
            self.ts_type = Some(ts_type.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ts_type.is_none() && self.ts_doc.is_none() && self.ts_transform.is_none()
    }
}
