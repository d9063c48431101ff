//! Import, export, part and part-of directives.

use dartgen_codegen::{CodeFragment, Renderable};
use dartgen_core::quote_string;

use super::uri::UriReference;
use crate::error::{Guard, NodeKind, Result};

/// `show` / `hide` name lists shared by imports and exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct Combinators {
    show: Vec<String>,
    hide: Vec<String>,
}

impl Combinators {
    fn check(&self, guard: &Guard<'_>) -> Result<()> {
        guard.exclusive(("show", !self.show.is_empty()), ("hide", !self.hide.is_empty()))?;
        for name in self.show.iter().chain(&self.hide) {
            guard.identifier(name)?;
        }
        Ok(())
    }

    fn text(&self) -> String {
        if !self.show.is_empty() {
            format!(" show {}", self.show.join(", "))
        } else if !self.hide.is_empty() {
            format!(" hide {}", self.hide.join(", "))
        } else {
            String::new()
        }
    }
}

/// An `import` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Import {
    uri: UriReference,
    prefix: Option<String>,
    is_deferred: bool,
    combinators: Combinators,
}

impl Import {
    /// A plain import with no prefix or combinators.
    pub fn new(uri: UriReference) -> Self {
        Self {
            uri,
            prefix: None,
            is_deferred: false,
            combinators: Combinators::default(),
        }
    }

    pub fn builder(uri: UriReference) -> ImportBuilder {
        ImportBuilder {
            node: Self::new(uri),
        }
    }

    pub fn uri(&self) -> &UriReference {
        &self.uri
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn text(&self) -> String {
        let mut out = format!("import {}", quote_string(&self.uri.to_string()));
        if self.is_deferred {
            out.push_str(" deferred");
        }
        if let Some(prefix) = &self.prefix {
            out.push_str(" as ");
            out.push_str(prefix);
        }
        out.push_str(&self.combinators.text());
        out.push(';');
        out
    }
}

/// Builder for [`Import`].
#[derive(Debug, Clone)]
pub struct ImportBuilder {
    node: Import,
}

impl ImportBuilder {
    /// Import under a prefix (`as name`).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.node.prefix = Some(prefix.into());
        self
    }

    /// Load lazily; requires a prefix.
    pub fn deferred(mut self) -> Self {
        self.node.is_deferred = true;
        self
    }

    pub fn show(mut self, name: impl Into<String>) -> Self {
        self.node.combinators.show.push(name.into());
        self
    }

    pub fn hide(mut self, name: impl Into<String>) -> Self {
        self.node.combinators.hide.push(name.into());
        self
    }

    pub fn build(self) -> Result<Import> {
        let i = self.node;
        let label = i.uri.to_string();
        let guard = Guard::new(NodeKind::Directive, &label);

        guard.implies(("deferred", i.is_deferred), ("as", i.prefix.is_some()))?;
        if let Some(prefix) = &i.prefix {
            guard.identifier(prefix)?;
        }
        i.combinators.check(&guard)?;

        Ok(i)
    }
}

/// An `export` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Export {
    uri: UriReference,
    combinators: Combinators,
}

impl Export {
    pub fn new(uri: UriReference) -> Self {
        Self {
            uri,
            combinators: Combinators::default(),
        }
    }

    pub fn builder(uri: UriReference) -> ExportBuilder {
        ExportBuilder {
            node: Self::new(uri),
        }
    }

    pub fn uri(&self) -> &UriReference {
        &self.uri
    }

    fn text(&self) -> String {
        format!(
            "export {}{};",
            quote_string(&self.uri.to_string()),
            self.combinators.text()
        )
    }
}

/// Builder for [`Export`].
#[derive(Debug, Clone)]
pub struct ExportBuilder {
    node: Export,
}

impl ExportBuilder {
    pub fn show(mut self, name: impl Into<String>) -> Self {
        self.node.combinators.show.push(name.into());
        self
    }

    pub fn hide(mut self, name: impl Into<String>) -> Self {
        self.node.combinators.hide.push(name.into());
        self
    }

    pub fn build(self) -> Result<Export> {
        let e = self.node;
        let label = e.uri.to_string();
        let guard = Guard::new(NodeKind::Directive, &label);
        e.combinators.check(&guard)?;
        Ok(e)
    }
}

/// A `part` directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Part {
    uri: UriReference,
}

impl Part {
    pub fn new(uri: UriReference) -> Self {
        Self { uri }
    }

    pub fn uri(&self) -> &UriReference {
        &self.uri
    }
}

/// A `part of` directive, naming the owning library or pointing at its file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartOf {
    Library(String),
    Uri(UriReference),
}

impl PartOf {
    /// Prefer the library name when the owner declares one.
    pub fn smart(library_name: Option<String>, uri: UriReference) -> Self {
        match library_name {
            Some(name) if !name.is_empty() => Self::Library(name),
            _ => Self::Uri(uri),
        }
    }

    fn text(&self) -> String {
        match self {
            Self::Library(name) => format!("part of {};", name),
            Self::Uri(uri) => format!("part of {};", quote_string(&uri.to_string())),
        }
    }
}

/// Any directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    Import(Import),
    Export(Export),
    Part(Part),
    PartOf(PartOf),
}

impl Directive {
    pub fn to_source(&self) -> String {
        match self {
            Directive::Import(i) => i.text(),
            Directive::Export(e) => e.text(),
            Directive::Part(p) => format!("part {};", quote_string(&p.uri.to_string())),
            Directive::PartOf(p) => p.text(),
        }
    }
}

impl Renderable for Directive {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.to_source())]
    }
}

impl From<Import> for Directive {
    fn from(i: Import) -> Self {
        Directive::Import(i)
    }
}

impl From<Export> for Directive {
    fn from(e: Export) -> Self {
        Directive::Export(e)
    }
}

impl From<Part> for Directive {
    fn from(p: Part) -> Self {
        Directive::Part(p)
    }
}

impl From<PartOf> for Directive {
    fn from(p: PartOf) -> Self {
        Directive::PartOf(p)
    }
}
