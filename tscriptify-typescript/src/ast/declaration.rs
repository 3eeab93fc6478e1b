//! Class and interface declarations.

use tscriptify_codegen::{CodeFragment, Renderable};
use tscriptify_core::{PRESERVED_END, preserved_start};

/// A class or interface built from a struct type.
#[derive(Debug, Clone)]
pub struct Declaration {
    name: String,
    interface: bool,
    exported: bool,
    members: Vec<String>,
    initializers: Vec<String>,
    constructor: bool,
    create_from: bool,
    custom_code: Option<String>,
}

impl Declaration {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interface: false,
            exported: true,
            members: Vec::new(),
            initializers: Vec::new(),
            constructor: false,
            create_from: false,
            custom_code: None,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            interface: true,
            ..Self::class(name)
        }
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.members.extend(members.into_iter().map(Into::into));
        self
    }

    /// Emit a constructor running `initializers`. Ignored for interfaces.
    pub fn constructor(mut self, initializers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.constructor = true;
        self.initializers
            .extend(initializers.into_iter().map(Into::into));
        self
    }

    /// Emit the legacy `static createFrom` factory. Ignored for interfaces.
    pub fn create_from(mut self) -> Self {
        self.create_from = true;
        self
    }

    /// Hand-written code re-inserted between the preserved-code markers.
    pub fn custom_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.custom_code = (!code.is_empty()).then_some(code);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn header(&self) -> String {
        let export = if self.exported { "export " } else { "" };
        let keyword = if self.interface { "interface" } else { "class" };
        format!("{}{} {}", export, keyword, self.name)
    }

    fn needs_convert_values(&self) -> bool {
        self.initializers
            .iter()
            .any(|line| line.contains("this.convertValues"))
    }

    fn body(&self) -> Vec<CodeFragment> {
        let mut body: Vec<CodeFragment> = self.members.iter().map(CodeFragment::line).collect();

        if !self.interface {
            if self.create_from {
                separate(&mut body);
                body.push(CodeFragment::block(
                    "static createFrom(source: any = {}) {",
                    vec![CodeFragment::line(format!("return new {}(source);", self.name))],
                    Some("}".to_string()),
                ));
            }
            if self.constructor || self.create_from {
                separate(&mut body);
                let mut statements = vec![CodeFragment::line(
                    "if ('string' === typeof source) source = JSON.parse(source);",
                )];
                statements.extend(self.initializers.iter().map(CodeFragment::line));
                body.push(CodeFragment::block(
                    "constructor(source: any = {}) {",
                    statements,
                    Some("}".to_string()),
                ));

                if self.needs_convert_values() {
                    body.push(CodeFragment::blank());
                    body.push(convert_values());
                }
            }
        }

        if let Some(code) = &self.custom_code {
            body.push(CodeFragment::line(preserved_start(&self.name)));
            body.push(CodeFragment::raw(format!("{}\n\n", code)));
            body.push(CodeFragment::line(PRESERVED_END));
        }

        body
    }
}

fn separate(body: &mut Vec<CodeFragment>) {
    if !body.is_empty() {
        body.push(CodeFragment::blank());
    }
}

/// Hydration helper rebuilding nested objects, arrays and maps of objects.
fn convert_values() -> CodeFragment {
    let close = || Some("}".to_string());
    CodeFragment::block(
        "convertValues(a: any, classs: any, asMap: boolean = false): any {",
        vec![
            CodeFragment::block("if (!a) {", vec![CodeFragment::line("return a;")], close()),
            CodeFragment::block(
                "if (a.slice) {",
                vec![CodeFragment::line(
                    "return (a as any[]).map(elem => this.convertValues(elem, classs));",
                )],
                None,
            ),
            CodeFragment::block(
                "} else if (\"object\" === typeof a) {",
                vec![
                    CodeFragment::block(
                        "if (asMap) {",
                        vec![
                            CodeFragment::block(
                                "for (const key of Object.keys(a)) {",
                                vec![CodeFragment::line("a[key] = new classs(a[key]);")],
                                close(),
                            ),
                            CodeFragment::line("return a;"),
                        ],
                        close(),
                    ),
                    CodeFragment::line("return new classs(a);"),
                ],
                close(),
            ),
            CodeFragment::line("return a;"),
        ],
        close(),
    )
}

impl Renderable for Declaration {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = self.body();
        if body.is_empty() {
            return vec![CodeFragment::line(format!("{} {{}}", self.header()))];
        }
        vec![CodeFragment::block(
            format!("{} {{", self.header()),
            body,
            Some("}".to_string()),
        )]
    }
}
