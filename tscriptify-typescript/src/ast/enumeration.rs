//! TypeScript enums.

use tscriptify_codegen::{CodeFragment, Renderable};
use tscriptify_ir::EnumElement;

#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    exported: bool,
    members: Vec<(String, String)>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exported: true,
            members: Vec::new(),
        }
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// `name = literal,` where the literal is the value's TypeScript form.
    pub fn member(mut self, element: &EnumElement) -> Self {
        self.members
            .push((element.name.clone(), element.value.to_string()));
        self
    }

    pub fn members<'a>(self, elements: impl IntoIterator<Item = &'a EnumElement>) -> Self {
        elements.into_iter().fold(self, Self::member)
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let export = if self.exported { "export " } else { "" };
        vec![CodeFragment::block(
            format!("{}enum {} {{", export, self.name),
            self.members
                .iter()
                .map(|(name, value)| CodeFragment::line(format!("{} = {},", name, value)))
                .collect(),
            Some("}".to_string()),
        )]
    }
}
