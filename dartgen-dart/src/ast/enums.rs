//! Enum declarations.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    class::check_constructor_owner,
    common::{
        Meta, TypeParam, check_mixins_and_interfaces, check_not_self, check_type_params,
        clause_text, type_params_text,
    },
    initializers::Arguments,
    member::{Member, braced, member_fragments},
};
use crate::error::{Guard, NodeKind, Result, Violation};

/// One value of an enum, optionally passing constructor arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    name: String,
    meta: Meta,
    constructor: Option<String>,
    args: Option<Arguments>,
}

impl EnumConstant {
    pub fn builder(name: impl Into<String>) -> EnumConstantBuilder {
        EnumConstantBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                constructor: None,
                args: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the constant invokes a constructor.
    pub fn has_args(&self) -> bool {
        self.args.is_some()
    }

    fn text(&self) -> String {
        match (&self.constructor, &self.args) {
            (Some(ctor), Some(args)) => format!("{}.{}({})", self.name, ctor, args),
            (None, Some(args)) => format!("{}({})", self.name, args),
            _ => self.name.clone(),
        }
    }
}

/// Builder for [`EnumConstant`].
#[derive(Debug, Clone)]
pub struct EnumConstantBuilder {
    node: EnumConstant,
}

impl EnumConstantBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    /// Pass arguments to the unnamed constructor.
    pub fn args(mut self, args: Arguments) -> Self {
        self.node.args = Some(args);
        self
    }

    /// Pass arguments to a named constructor.
    pub fn named_ctor(mut self, constructor: impl Into<String>, args: Arguments) -> Self {
        self.node.constructor = Some(constructor.into());
        self.node.args = Some(args);
        self
    }

    pub fn build(self) -> Result<EnumConstant> {
        let c = self.node;
        let guard = Guard::new(NodeKind::EnumConstant, &c.name);
        guard.identifier(&c.name)?;
        if let Some(ctor) = &c.constructor {
            guard.identifier(ctor)?;
        }
        Ok(c)
    }
}

/// An enum declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Enum {
    name: String,
    meta: Meta,
    type_params: Vec<TypeParam>,
    mixins: Vec<String>,
    interfaces: Vec<String>,
    constants: Vec<EnumConstant>,
    members: Vec<Member>,
}

impl Enum {
    pub fn builder(name: impl Into<String>) -> EnumBuilder {
        EnumBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                type_params: Vec::new(),
                mixins: Vec::new(),
                interfaces: Vec::new(),
                constants: Vec::new(),
                members: Vec::new(),
            },
        }
    }

    pub fn to_builder(&self) -> EnumBuilder {
        EnumBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constants(&self) -> &[EnumConstant] {
        &self.constants
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    fn header(&self) -> String {
        format!(
            "enum {}{}{}{}",
            self.name,
            type_params_text(&self.type_params),
            clause_text("with", &self.mixins),
            clause_text("implements", &self.interfaces)
        )
    }

    fn body(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        let last = self.constants.len().saturating_sub(1);
        for (i, constant) in self.constants.iter().enumerate() {
            body.extend(constant.meta.to_fragments());
            let terminator = match (i == last, self.members.is_empty()) {
                (false, _) => ",",
                (true, false) => ";",
                (true, true) => "",
            };
            body.push(CodeFragment::line(format!("{}{}", constant.text(), terminator)));
        }
        if !self.members.is_empty() {
            body.push(CodeFragment::blank());
            body.extend(member_fragments(&self.members));
        }
        body
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.push(braced(self.header(), self.body()));
        fragments
    }
}

/// Builder for [`Enum`].
#[derive(Debug, Clone)]
pub struct EnumBuilder {
    node: Enum,
}

impl EnumBuilder {
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

    pub fn with(mut self, mixin: impl Into<String>) -> Self {
        self.node.mixins.push(mixin.into());
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.node.interfaces.push(interface.into());
        self
    }

    pub fn constant(mut self, constant: EnumConstant) -> Self {
        self.node.constants.push(constant);
        self
    }

    /// Add argument-less constants by name.
    pub fn values<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let constant = EnumConstant::builder(name).build()?;
            self.node.constants.push(constant);
        }
        Ok(self)
    }

    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.node.members.push(member.into());
        self
    }

    pub fn build(self) -> Result<Enum> {
        let e = self.node;
        let guard = Guard::new(NodeKind::Enum, &e.name);

        guard.identifier(&e.name)?;
        check_type_params(&e.type_params)?;
        guard.ensure(!e.constants.is_empty(), || Violation::EmptyEnum)?;

        let mut seen: Vec<&str> = Vec::with_capacity(e.constants.len());
        for constant in &e.constants {
            guard.ensure(!seen.contains(&constant.name()), || {
                Violation::Duplicate("constant", constant.name().to_string())
            })?;
            seen.push(constant.name());
        }

        let has_ctor = e.members.iter().any(Member::is_constructor);
        guard.ensure(has_ctor || !e.constants.iter().any(EnumConstant::has_args), || {
            Violation::MissingEnumConstructor
        })?;

        for member in &e.members {
            match member {
                Member::Property(p) if member.is_instance_field() => {
                    guard.ensure(p.is_final(), || {
                        Violation::IllegalMember("an enum", "mutable fields")
                    })?;
                }
                Member::Constructor(c) => {
                    guard.ensure(c.is_const() || c.is_factory(), || {
                        Violation::IllegalMember("an enum", "non-const generative constructors")
                    })?;
                }
                _ => {}
            }
        }

        check_not_self(&guard, &e.name, "with", &e.mixins)?;
        check_not_self(&guard, &e.name, "implements", &e.interfaces)?;
        check_mixins_and_interfaces(&guard, &e.mixins, &e.interfaces)?;
        check_constructor_owner(&guard, &e.name, &e.members)?;

        Ok(e)
    }
}
