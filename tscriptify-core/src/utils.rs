//! Shared string utilities for code generation.

/// Options for [`camel_case`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CamelCaseOptions {
    /// Keep runs of capitals as they are (`FooBAR` -> `fooBAR`) instead of
    /// folding them (`XMLHttpRequest` -> `xmlHttpRequest`).
    pub preserve_consecutive_uppercase: bool,
}

impl CamelCaseOptions {
    /// Options that keep consecutive uppercase letters untouched.
    pub fn preserve_consecutive_uppercase() -> Self {
        Self {
            preserve_consecutive_uppercase: true,
        }
    }
}

/// Convert a PascalCase identifier to camelCase (e.g., "FooBar" -> "fooBar").
///
/// A single left-to-right pass: the first character is lowercased, a
/// character following a digit is uppercased, and inside a run of capitals
/// every letter followed by another capital is lowercased unless
/// [`CamelCaseOptions::preserve_consecutive_uppercase`] is set.
pub fn camel_case(s: &str, options: CamelCaseOptions) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());

    let mut prev_was_lower = false;
    let mut prev_was_digit = false;

    for (i, &original) in chars.iter().enumerate() {
        let mut c = original;
        if i == 0 {
            result.extend(c.to_lowercase());
        } else {
            if prev_was_digit {
                c = to_upper(c);
            }

            if prev_was_lower || !c.is_uppercase() || options.preserve_consecutive_uppercase {
                result.push(c);
            } else if chars.get(i + 1).is_some_and(|next| next.is_uppercase()) {
                // Interior of a run of capitals
                result.extend(c.to_lowercase());
            } else {
                result.push(c);
            }
        }

        prev_was_lower = !c.is_uppercase();
        prev_was_digit = c.is_ascii_digit();
    }

    result
}

fn to_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}
