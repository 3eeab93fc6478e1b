//! Fragments of generated text.

/// A piece of generated code, independent of the nesting level it ends up at.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line (newline appended).
    Line(String),
    Blank,
    /// Text written as is, without indentation or newline.
    Raw(String),
    /// Header line, body one level deeper, optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }
}

/// Nodes that can be written by a [`CodeBuilder`](super::CodeBuilder).
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl Renderable for CodeFragment {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![self.clone()]
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_constructor() {
        let block = CodeFragment::block(
            "enum Color {",
            vec![CodeFragment::line("Red = 0,")],
            Some("}".to_string()),
        );
        let CodeFragment::Block {
            header,
            body,
            close,
        } = block
        else {
            panic!("Expected Block variant");
        };
        assert_eq!(header, "enum Color {");
        assert_eq!(body, [CodeFragment::Line("Red = 0,".to_string())]);
        assert_eq!(close.as_deref(), Some("}"));
    }
}
