//! Struct tag parsing.
//!
//! Tags use the conventional `key:"value" key2:"value2"` syntax. A value is
//! a comma separated list whose first component is the tag's name and whose
//! remaining components are options (`json:"name,omitempty"`).

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error produced by malformed tag text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed struct tag `{text}`: {reason}")]
pub struct TagError {
    pub text: String,
    pub reason: &'static str,
}

impl TagError {
    fn new(text: &str, reason: &'static str) -> Self {
        Self {
            text: text.to_string(),
            reason,
        }
    }
}

/// A single `key:"name,opt1,opt2"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub name: String,
    pub options: Vec<String>,
}

impl Tag {
    /// Build a tag from its key and raw (unquoted) value.
    pub fn new(key: impl Into<String>, value: &str) -> Self {
        let mut parts = value.split(',');
        let name = parts.next().unwrap_or_default().to_string();
        Self {
            key: key.into(),
            name,
            options: parts.map(str::to_string).collect(),
        }
    }

    /// Replace the options, keeping the name.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Raw value: name followed by the options.
    pub fn value(&self) -> String {
        if self.options.is_empty() {
            self.name.clone()
        } else {
            format!("{},{}", self.name, self.options.join(","))
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.key,
            serde_json::Value::String(self.value())
        )
    }
}

/// Ordered set of tags attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<Tag>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tag text such as `json:"id,omitempty" ts_type:"Date"`.
    pub fn parse(text: &str) -> Result<Self, TagError> {
        let mut tags = Vec::new();
        let mut rest = text;

        loop {
            rest = rest.trim_start();
            if rest.is_empty() {
                break;
            }

            let colon = rest
                .find(':')
                .ok_or_else(|| TagError::new(text, "expected `key:\"value\"`"))?;
            let key = &rest[..colon];
            if key.is_empty() || key.contains(|c: char| c.is_whitespace() || c == '"') {
                return Err(TagError::new(text, "invalid tag key"));
            }

            let quoted = rest[colon + 1..]
                .strip_prefix('"')
                .ok_or_else(|| TagError::new(text, "tag value must be double-quoted"))?;

            let mut value = String::new();
            let mut end = None;
            let mut chars = quoted.char_indices();
            while let Some((i, c)) = chars.next() {
                match c {
                    '"' => {
                        end = Some(i);
                        break;
                    }
                    '\\' => match chars.next() {
                        Some((_, 'n')) => value.push('\n'),
                        Some((_, 't')) => value.push('\t'),
                        Some((_, escaped)) => value.push(escaped),
                        None => break,
                    },
                    c => value.push(c),
                }
            }
            let end = end.ok_or_else(|| TagError::new(text, "unterminated tag value"))?;

            tags.push(Tag::new(key, &value));
            rest = &quoted[end + 1..];
        }

        Ok(Self(tags))
    }

    /// First tag with the given key.
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.0.iter().find(|tag| tag.key == key)
    }

    /// Raw value of the tag with the given key, if present and non-empty.
    pub fn value(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(Tag::value)
            .filter(|value| !value.is_empty())
    }

    /// Replace the tag with the same key, or append it.
    pub fn set(&mut self, tag: Tag) {
        match self.0.iter_mut().find(|existing| existing.key == tag.key) {
            Some(existing) => *existing = tag,
            None => self.0.push(tag),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Tags {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_tags() {
        let tags = Tags::parse(r#"json:"created,omitempty" ts_type:"Date""#).unwrap();
        let json = tags.get("json").unwrap();
        assert_eq!(json.name, "created");
        assert_eq!(json.options, vec!["omitempty"]);
        assert!(json.has_option("omitempty"));
        assert_eq!(tags.value("ts_type").as_deref(), Some("Date"));
        assert_eq!(tags.value("ts_doc"), None);
    }

    #[test]
    fn test_parse_escaped_quote() {
        let tags = Tags::parse(r#"ts_transform:"__VALUE__ + \"x\"""#).unwrap();
        assert_eq!(
            tags.value("ts_transform").as_deref(),
            Some(r#"__VALUE__ + "x""#)
        );
    }

    #[test]
    fn test_parse_empty_name_with_options() {
        let tags = Tags::parse(r#"json:",omitempty""#).unwrap();
        let json = tags.get("json").unwrap();
        assert_eq!(json.name, "");
        assert_eq!(json.value(), ",omitempty");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Tags::parse("json").is_err());
        assert!(Tags::parse("json:name").is_err());
        assert!(Tags::parse(r#"json:"unterminated"#).is_err());
        assert!(Tags::parse(r#":"x""#).is_err());
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(Tags::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut tags = Tags::parse(r#"json:"a" xml:"b""#).unwrap();
        tags.set(Tag::new("json", "a,omitempty"));
        tags.set(Tag::new("ts_doc", "Docs"));
        assert_eq!(
            tags.to_string(),
            r#"json:"a,omitempty" xml:"b" ts_doc:"Docs""#
        );
    }

    #[test]
    fn test_with_options_keeps_name() {
        let tag = Tag::new("json", "id,string").with_options(["omitempty"]);
        assert_eq!(tag.value(), "id,omitempty");
    }
}
