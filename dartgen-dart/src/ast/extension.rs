//! Extension declarations.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    common::{Meta, TypeParam, check_type_params, type_params_text},
    member::{Member, braced, member_fragments},
};
use crate::error::{Guard, NodeKind, Result, Violation};

/// An extension on a type; the name is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    name: Option<String>,
    on: String,
    meta: Meta,
    type_params: Vec<TypeParam>,
    members: Vec<Member>,
}

impl Extension {
    /// Start building an extension on the given type.
    pub fn builder(on: impl Into<String>) -> ExtensionBuilder {
        ExtensionBuilder {
            node: Self {
                name: None,
                on: on.into(),
                meta: Meta::default(),
                type_params: Vec::new(),
                members: Vec::new(),
            },
        }
    }

    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder { node: self.clone() }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The extended type.
    pub fn on(&self) -> &str {
        &self.on
    }

    fn header(&self) -> String {
        let mut out = String::from("extension");
        if let Some(name) = &self.name {
            out.push(' ');
            out.push_str(name);
        }
        out.push_str(&type_params_text(&self.type_params));
        out.push_str(" on ");
        out.push_str(&self.on);
        out
    }
}

impl Renderable for Extension {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.push(braced(self.header(), member_fragments(&self.members)));
        fragments
    }
}

/// Builder for [`Extension`].
#[derive(Debug, Clone)]
pub struct ExtensionBuilder {
    node: Extension,
}

impl ExtensionBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node.name = Some(name.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.node.type_params.push(param);
        self
    }

    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.node.members.push(member.into());
        self
    }

    pub fn build(self) -> Result<Extension> {
        let e = self.node;
        let label = e.name.clone().unwrap_or_else(|| format!("on {}", e.on));
        let guard = Guard::new(NodeKind::Extension, &label);

        if let Some(name) = &e.name {
            guard.identifier(name)?;
        }
        guard.ensure(!e.on.trim().is_empty(), || Violation::MissingType("on"))?;
        check_type_params(&e.type_params)?;
        guard.ensure(!e.members.iter().any(Member::is_constructor), || {
            Violation::IllegalMember("an extension", "constructors")
        })?;
        guard.ensure(!e.members.iter().any(Member::is_instance_field), || {
            Violation::IllegalMember("an extension", "instance fields")
        })?;

        Ok(e)
    }
}
