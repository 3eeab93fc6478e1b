//! Enum member values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Literal value of an enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Renders the value as a TypeScript literal (`0`, `1.5`, `true`, `"text"`).
impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Bool(b) => write!(f, "{}", b),
            EnumValue::Int(i) => write!(f, "{}", i),
            EnumValue::Float(x) if x.is_nan() => f.write_str("NaN"),
            EnumValue::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_negative() { "-Infinity" } else { "Infinity" })
            }
            EnumValue::Float(x) => write!(f, "{}", x),
            EnumValue::String(s) => write!(f, "{}", serde_json::Value::String(s.clone())),
        }
    }
}

impl From<i64> for EnumValue {
    fn from(value: i64) -> Self {
        EnumValue::Int(value)
    }
}

impl From<&str> for EnumValue {
    fn from(value: &str) -> Self {
        EnumValue::String(value.to_string())
    }
}

impl From<bool> for EnumValue {
    fn from(value: bool) -> Self {
        EnumValue::Bool(value)
    }
}

impl From<f64> for EnumValue {
    fn from(value: f64) -> Self {
        EnumValue::Float(value)
    }
}

/// One `(literal value, display name)` member of an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumElement {
    pub value: EnumValue,
    pub name: String,
}

impl EnumElement {
    pub fn new(value: impl Into<EnumValue>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(EnumValue::from(3).to_string(), "3");
        assert_eq!(EnumValue::from(-1).to_string(), "-1");
        assert_eq!(EnumValue::from(1.5).to_string(), "1.5");
        assert_eq!(EnumValue::from(true).to_string(), "true");
        assert_eq!(EnumValue::from("red").to_string(), "\"red\"");
        assert_eq!(
            EnumValue::from("say \"hi\"").to_string(),
            r#""say \"hi\"""#
        );
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(EnumValue::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(EnumValue::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(EnumValue::from(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<EnumValue> = serde_json::from_str(r#"[1, 2.5, "x", false]"#).unwrap();
        assert_eq!(
            values,
            vec![
                EnumValue::Int(1),
                EnumValue::Float(2.5),
                EnumValue::String("x".to_string()),
                EnumValue::Bool(false),
            ]
        );
    }
}
