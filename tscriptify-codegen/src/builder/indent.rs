//! Indentation configuration for code generation.

use std::borrow::Cow;

/// Indentation unit for one nesting level of generated code.
///
/// Any string is accepted so that generated files can follow the
/// conventions of the project they land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indent(Cow<'static, str>);

impl Indent {
    /// 4-space indentation (the generator's default).
    pub const FOUR_SPACES: Self = Self(Cow::Borrowed("    "));

    /// Tab indentation.
    pub const TAB: Self = Self(Cow::Borrowed("\t"));

    /// Use an arbitrary string as one indentation level.
    pub fn new(unit: impl Into<String>) -> Self {
        Self(Cow::Owned(unit.into()))
    }

    /// The string for one indent level.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::FOUR_SPACES
    }
}

impl From<&str> for Indent {
    fn from(unit: &str) -> Self {
        Self::new(unit)
    }
}
