//! Mixin declarations.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    class::ClassModifier,
    common::{
        Meta, TypeParam, check_not_self, check_type_params, clause_text, keywords,
        type_params_text,
    },
    member::{Member, braced, member_fragments},
};
use crate::error::{Guard, NodeKind, Result, Violation};

/// A mixin declaration, e.g. `base mixin Logging on Service`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mixin {
    name: String,
    meta: Meta,
    modifier: Option<ClassModifier>,
    type_params: Vec<TypeParam>,
    on: Vec<String>,
    interfaces: Vec<String>,
    members: Vec<Member>,
}

impl Mixin {
    pub fn builder(name: impl Into<String>) -> MixinBuilder {
        MixinBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                modifier: None,
                type_params: Vec::new(),
                on: Vec::new(),
                interfaces: Vec::new(),
                members: Vec::new(),
            },
        }
    }

    pub fn to_builder(&self) -> MixinBuilder {
        MixinBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    fn header(&self) -> String {
        format!(
            "{}mixin {}{}{}{}",
            keywords(&[("base", self.modifier == Some(ClassModifier::Base))]),
            self.name,
            type_params_text(&self.type_params),
            clause_text("on", &self.on),
            clause_text("implements", &self.interfaces)
        )
    }
}

impl Renderable for Mixin {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.push(braced(self.header(), member_fragments(&self.members)));
        fragments
    }
}

/// Builder for [`Mixin`].
#[derive(Debug, Clone)]
pub struct MixinBuilder {
    node: Mixin,
}

impl MixinBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    /// Only [`ClassModifier::Base`] is accepted by [`MixinBuilder::build`].
    pub fn modifier(mut self, modifier: ClassModifier) -> Self {
        self.node.modifier = Some(modifier);
        self
    }

    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.node.type_params.push(param);
        self
    }

    /// Add a superclass constraint.
    pub fn on(mut self, ty: impl Into<String>) -> Self {
        self.node.on.push(ty.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.node.interfaces.push(interface.into());
        self
    }

    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.node.members.push(member.into());
        self
    }

    pub fn build(self) -> Result<Mixin> {
        let m = self.node;
        let guard = Guard::new(NodeKind::Mixin, &m.name);

        guard.identifier(&m.name)?;
        check_type_params(&m.type_params)?;
        if let Some(modifier) = m.modifier.filter(|m| *m != ClassModifier::Base) {
            return Err(guard.fail(Violation::IllegalModifier(modifier.as_str(), "a mixin")));
        }
        guard.ensure(!m.members.iter().any(Member::is_constructor), || {
            Violation::IllegalMember("a mixin", "constructors")
        })?;
        check_not_self(&guard, &m.name, "on", &m.on)?;
        check_not_self(&guard, &m.name, "implements", &m.interfaces)?;

        Ok(m)
    }
}
