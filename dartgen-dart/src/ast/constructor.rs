//! Constructors.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    common::{Body, Meta, keywords, with_body},
    initializers::Initializer,
    params::{Param, ParamList},
};
use crate::error::{Guard, NodeKind, Result, Violation};

/// A constructor of a class or enum.
///
/// The owning type is referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor {
    class_name: String,
    name: Option<String>,
    meta: Meta,
    params: ParamList,
    raw_params: Vec<Param>,
    multiline_params: bool,
    is_const: bool,
    is_factory: bool,
    is_external: bool,
    initializers: Vec<Initializer>,
    body: Option<Body>,
}

impl Constructor {
    /// Start building the unnamed constructor of `class_name`.
    pub fn builder(class_name: impl Into<String>) -> ConstructorBuilder {
        ConstructorBuilder {
            node: Self {
                class_name: class_name.into(),
                name: None,
                meta: Meta::default(),
                params: ParamList::default(),
                raw_params: Vec::new(),
                multiline_params: false,
                is_const: false,
                is_factory: false,
                is_external: false,
                initializers: Vec::new(),
                body: None,
            },
        }
    }

    /// Start building the named constructor `class_name.name`.
    pub fn named(class_name: impl Into<String>, name: impl Into<String>) -> ConstructorBuilder {
        let mut builder = Self::builder(class_name);
        builder.node.name = Some(name.into());
        builder
    }

    pub fn to_builder(&self) -> ConstructorBuilder {
        ConstructorBuilder { node: self.clone() }
    }

    /// Name of the class or enum this constructor belongs to.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    pub fn initializers(&self) -> &[Initializer] {
        &self.initializers
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn is_factory(&self) -> bool {
        self.is_factory
    }

    fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("{}.{}", self.class_name, name),
            None => self.class_name.clone(),
        }
    }

    fn signature(&self) -> String {
        let mut out = keywords(&[
            ("external", self.is_external),
            ("const", self.is_const),
            ("factory", self.is_factory),
        ]);
        out.push_str(&self.display_name());
        out.push_str(&self.params.to_source(self.multiline_params));
        if !self.initializers.is_empty() {
            let list = self
                .initializers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(" : ");
            out.push_str(&list);
        }
        out
    }
}

impl Renderable for Constructor {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.extend(with_body(self.signature(), self.body.as_ref()));
        fragments
    }
}

/// Builder for [`Constructor`].
#[derive(Debug, Clone)]
pub struct ConstructorBuilder {
    node: Constructor,
}

impl ConstructorBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.node.raw_params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.node.raw_params.extend(params);
        self
    }

    /// Add a trailing comma so a formatter puts one parameter per line.
    pub fn multiline_params(mut self) -> Self {
        self.node.multiline_params = true;
        self
    }

    pub fn const_(mut self) -> Self {
        self.node.is_const = true;
        self
    }

    pub fn factory(mut self) -> Self {
        self.node.is_factory = true;
        self
    }

    pub fn external(mut self) -> Self {
        self.node.is_external = true;
        self
    }

    pub fn initializer(mut self, initializer: Initializer) -> Self {
        self.node.initializers.push(initializer);
        self
    }

    pub fn body(mut self, statements: impl Into<String>) -> Self {
        self.node.body = Some(Body::Block(statements.into()));
        self
    }

    /// Arrow body; only factories may use one.
    pub fn arrow(mut self, expr: impl Into<String>) -> Self {
        self.node.body = Some(Body::Arrow(expr.into()));
        self
    }

    pub fn build(self) -> Result<Constructor> {
        let mut c = self.node;
        let display = c.display_name();
        let guard = Guard::new(NodeKind::Constructor, &display);

        guard.identifier(&c.class_name)?;
        if let Some(name) = &c.name {
            guard.identifier(name)?;
        }

        c.params = ParamList::partition(c.raw_params.iter().cloned());
        c.params.check(&guard)?;
        for initializer in &c.initializers {
            if let Some(name) = initializer.target_name() {
                guard.identifier(name)?;
            }
        }

        guard.exclusive(("const", c.is_const), ("factory", c.is_factory))?;
        guard.exclusive(("const", c.is_const), ("external", c.is_external))?;
        if c.is_external {
            guard.ensure(c.body.is_none(), || Violation::UnexpectedBody)?;
            guard.ensure(c.initializers.is_empty(), || {
                Violation::UnexpectedInitializers("external")
            })?;
        }
        if c.is_const {
            guard.ensure(c.body.is_none(), || Violation::UnexpectedBody)?;
        }

        if c.is_factory {
            reject_formals(&guard, &c.params, "factory")?;
            guard.ensure(c.initializers.is_empty(), || {
                Violation::UnexpectedInitializers("factory")
            })?;
            guard.ensure(c.is_external || c.body.is_some(), || Violation::MissingBody)?;
        } else {
            guard.implies(
                ("=>", c.body.as_ref().is_some_and(Body::is_arrow)),
                ("factory", false),
            )?;
        }

        if c.initializers.iter().any(Initializer::is_redirect) {
            guard.ensure(c.initializers.len() == 1 && c.body.is_none(), || {
                Violation::RedirectNotAlone
            })?;
            reject_formals(&guard, &c.params, "redirecting")?;
        }
        guard.ensure(
            c.initializers.iter().filter(|i| i.is_super()).count() <= 1,
            || Violation::MultipleSuperCalls,
        )?;

        // Render order is asserts, field assignments, then the super call.
        c.initializers.sort_by_key(Initializer::rank);

        Ok(c)
    }
}

/// Only non-redirecting generative constructors take `this.` and `super.` formals.
fn reject_formals(guard: &Guard<'_>, params: &ParamList, constructor: &'static str) -> Result<()> {
    match params.iter().find_map(Param::formal_text) {
        Some(formal) => Err(guard.fail(Violation::MisplacedFormal {
            formal,
            constructor,
        })),
        None => Ok(()),
    }
}
