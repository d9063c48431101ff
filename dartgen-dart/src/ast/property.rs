//! Field declarations inside classes, enums, mixins and extensions.

use dartgen_codegen::{CodeFragment, Renderable};

use super::common::{Meta, keywords};
use crate::error::{Guard, NodeKind, Result, Violation};

/// A field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    name: String,
    meta: Meta,
    ty: Option<String>,
    is_static: bool,
    is_const: bool,
    is_final: bool,
    is_late: bool,
    is_covariant: bool,
    is_external: bool,
    default: Option<String>,
}

impl Property {
    pub fn builder(name: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                ty: None,
                is_static: false,
                is_const: false,
                is_final: false,
                is_late: false,
                is_covariant: false,
                is_external: false,
                default: None,
            },
        }
    }

    pub fn to_builder(&self) -> PropertyBuilder {
        PropertyBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    fn declaration(&self) -> String {
        let mut out = keywords(&[
            ("external", self.is_external),
            ("static", self.is_static),
            ("covariant", self.is_covariant),
            ("late", self.is_late),
            ("const", self.is_const),
            ("final", self.is_final),
        ]);
        match &self.ty {
            Some(ty) => {
                out.push_str(ty);
                out.push(' ');
            }
            None if !self.is_const && !self.is_final => out.push_str("var "),
            None => {}
        }
        out.push_str(&self.name);
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out.push(';');
        out
    }
}

impl Renderable for Property {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.push(CodeFragment::line(self.declaration()));
        fragments
    }
}

/// Builder for [`Property`].
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    node: Property,
}

impl PropertyBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.node.ty = Some(ty.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.node.is_static = true;
        self
    }

    pub fn const_(mut self) -> Self {
        self.node.is_const = true;
        self
    }

    pub fn final_(mut self) -> Self {
        self.node.is_final = true;
        self
    }

    pub fn late(mut self) -> Self {
        self.node.is_late = true;
        self
    }

    pub fn covariant(mut self) -> Self {
        self.node.is_covariant = true;
        self
    }

    pub fn external(mut self) -> Self {
        self.node.is_external = true;
        self
    }

    /// Set the initial value expression.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.node.default = Some(value.into());
        self
    }

    pub fn build(self) -> Result<Property> {
        let p = self.node;
        let guard = Guard::new(NodeKind::Property, &p.name);

        guard.identifier(&p.name)?;
        guard.implies(("const", p.is_const), ("static", p.is_static))?;
        guard.exclusive(("const", p.is_const), ("final", p.is_final))?;
        guard.exclusive(("const", p.is_const), ("late", p.is_late))?;
        guard.exclusive(("const", p.is_const), ("external", p.is_external))?;
        guard.exclusive(("late", p.is_late), ("external", p.is_external))?;
        guard.exclusive(("static", p.is_static), ("covariant", p.is_covariant))?;
        guard.exclusive(("covariant", p.is_covariant), ("final", p.is_final))?;
        guard.ensure(!p.is_const || p.default.is_some(), || Violation::MissingValue)?;
        guard.ensure(!p.is_external || p.default.is_none(), || {
            Violation::UnexpectedValue
        })?;

        Ok(p)
    }
}
