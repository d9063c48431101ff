//! Getters and setters.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    common::{Body, Meta, body_modifier, check_callable, keywords, with_body},
    params::{Param, ParamGroup},
};
use crate::error::{Guard, NodeKind, Result, Violation};

/// A getter. Getters never take parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Getter {
    name: String,
    meta: Meta,
    ty: Option<String>,
    is_static: bool,
    is_external: bool,
    is_async: bool,
    is_generator: bool,
    body: Option<Body>,
}

impl Getter {
    pub fn builder(name: impl Into<String>) -> GetterBuilder {
        GetterBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                ty: None,
                is_static: false,
                is_external: false,
                is_async: false,
                is_generator: false,
                body: None,
            },
        }
    }

    pub fn to_builder(&self) -> GetterBuilder {
        GetterBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    fn signature(&self) -> String {
        let mut out = keywords(&[("external", self.is_external), ("static", self.is_static)]);
        if let Some(ty) = &self.ty {
            out.push_str(ty);
            out.push(' ');
        }
        out.push_str("get ");
        out.push_str(&self.name);
        if let Some(modifier) = body_modifier(self.is_async, self.is_generator) {
            out.push(' ');
            out.push_str(modifier);
        }
        out
    }
}

impl Renderable for Getter {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.extend(with_body(self.signature(), self.body.as_ref()));
        fragments
    }
}

/// Builder for [`Getter`].
#[derive(Debug, Clone)]
pub struct GetterBuilder {
    node: Getter,
}

impl GetterBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    /// Set the return type.
    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.node.ty = Some(ty.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.node.is_static = true;
        self
    }

    pub fn external(mut self) -> Self {
        self.node.is_external = true;
        self
    }

    pub fn async_(mut self) -> Self {
        self.node.is_async = true;
        self
    }

    pub fn generator(mut self) -> Self {
        self.node.is_generator = true;
        self
    }

    /// Use a block body holding the given statements.
    pub fn body(mut self, statements: impl Into<String>) -> Self {
        self.node.body = Some(Body::Block(statements.into()));
        self
    }

    /// Use an arrow body returning the given expression.
    pub fn arrow(mut self, expr: impl Into<String>) -> Self {
        self.node.body = Some(Body::Arrow(expr.into()));
        self
    }

    pub fn build(self) -> Result<Getter> {
        let g = self.node;
        let guard = Guard::new(NodeKind::Getter, &g.name);

        guard.identifier(&g.name)?;
        check_callable(
            &guard,
            g.is_external,
            g.is_async,
            g.is_generator,
            g.body.as_ref(),
        )?;

        Ok(g)
    }
}

/// A setter taking exactly one required positional parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Setter {
    name: String,
    meta: Meta,
    param: Param,
    is_static: bool,
    is_external: bool,
    body: Option<Body>,
}

impl Setter {
    pub fn builder(name: impl Into<String>, param: Param) -> SetterBuilder {
        SetterBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                param,
                is_static: false,
                is_external: false,
                body: None,
            },
        }
    }

    pub fn to_builder(&self) -> SetterBuilder {
        SetterBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> &Param {
        &self.param
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    fn signature(&self) -> String {
        format!(
            "{}set {}({})",
            keywords(&[("external", self.is_external), ("static", self.is_static)]),
            self.name,
            self.param
        )
    }
}

impl Renderable for Setter {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.extend(with_body(self.signature(), self.body.as_ref()));
        fragments
    }
}

/// Builder for [`Setter`].
#[derive(Debug, Clone)]
pub struct SetterBuilder {
    node: Setter,
}

impl SetterBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.node.is_static = true;
        self
    }

    pub fn external(mut self) -> Self {
        self.node.is_external = true;
        self
    }

    pub fn body(mut self, statements: impl Into<String>) -> Self {
        self.node.body = Some(Body::Block(statements.into()));
        self
    }

    pub fn arrow(mut self, expr: impl Into<String>) -> Self {
        self.node.body = Some(Body::Arrow(expr.into()));
        self
    }

    pub fn build(self) -> Result<Setter> {
        let s = self.node;
        let guard = Guard::new(NodeKind::Setter, &s.name);

        guard.identifier(&s.name)?;
        guard.ensure(
            s.param.group() == ParamGroup::RequiredPositional
                && !s.param.is_field_formal()
                && !s.param.is_super_formal(),
            || Violation::SetterParameter,
        )?;
        check_callable(&guard, s.is_external, false, false, s.body.as_ref())?;

        Ok(s)
    }
}
