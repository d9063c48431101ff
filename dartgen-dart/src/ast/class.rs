//! Class declarations.

use std::fmt;

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    common::{
        Meta, TypeParam, check_mixins_and_interfaces, check_not_self, check_type_params,
        clause_text, keywords, type_params_text,
    },
    member::{Member, braced, member_fragments},
};
use crate::error::{Guard, NodeKind, Result, Violation};

/// The single superclass-style modifier a class may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassModifier {
    Base,
    Interface,
    Final,
    Sealed,
}

impl ClassModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassModifier::Base => "base",
            ClassModifier::Interface => "interface",
            ClassModifier::Final => "final",
            ClassModifier::Sealed => "sealed",
        }
    }
}

impl fmt::Display for ClassModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Class {
    name: String,
    meta: Meta,
    is_abstract: bool,
    modifier: Option<ClassModifier>,
    is_mixin_class: bool,
    type_params: Vec<TypeParam>,
    extends: Option<String>,
    mixins: Vec<String>,
    interfaces: Vec<String>,
    members: Vec<Member>,
}

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                is_abstract: false,
                modifier: None,
                is_mixin_class: false,
                type_params: Vec::new(),
                extends: None,
                mixins: Vec::new(),
                interfaces: Vec::new(),
                members: Vec::new(),
            },
        }
    }

    pub fn to_builder(&self) -> ClassBuilder {
        ClassBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifier(&self) -> Option<ClassModifier> {
        self.modifier
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    fn header(&self) -> String {
        let mut out = keywords(&[("abstract", self.is_abstract)]);
        if let Some(modifier) = self.modifier {
            out.push_str(modifier.as_str());
            out.push(' ');
        }
        if self.is_mixin_class {
            out.push_str("mixin ");
        }
        out.push_str("class ");
        out.push_str(&self.name);
        out.push_str(&type_params_text(&self.type_params));
        if let Some(extends) = &self.extends {
            out.push_str(" extends ");
            out.push_str(extends);
        }
        out.push_str(&clause_text("with", &self.mixins));
        out.push_str(&clause_text("implements", &self.interfaces));
        out
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.push(braced(self.header(), member_fragments(&self.members)));
        fragments
    }
}

/// Builder for [`Class`].
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    node: Class,
}

impl ClassBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.node.meta.doc = Some(doc.into());
        self
    }

    pub fn annotation(mut self, annotation: impl Into<String>) -> Self {
        self.node.meta.annotations.push(annotation.into());
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.node.is_abstract = true;
        self
    }

    pub fn modifier(mut self, modifier: ClassModifier) -> Self {
        self.node.modifier = Some(modifier);
        self
    }

    /// Declare as `mixin class`.
    pub fn mixin_class(mut self) -> Self {
        self.node.is_mixin_class = true;
        self
    }

    pub fn type_param(mut self, param: TypeParam) -> Self {
        self.node.type_params.push(param);
        self
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.node.extends = Some(superclass.into());
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

    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.node.members.push(member.into());
        self
    }

    pub fn members<I, M>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Member>,
    {
        self.node.members.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Class> {
        let c = self.node;
        let guard = Guard::new(NodeKind::Class, &c.name);

        guard.identifier(&c.name)?;
        check_type_params(&c.type_params)?;

        guard.exclusive(
            ("sealed", c.modifier == Some(ClassModifier::Sealed)),
            ("abstract", c.is_abstract),
        )?;
        if c.is_mixin_class {
            if let Some(modifier) = c.modifier.filter(|m| *m != ClassModifier::Base) {
                return Err(guard.fail(Violation::Conflict("mixin", modifier.as_str())));
            }
            guard.exclusive(("mixin", true), ("extends", c.extends.is_some()))?;
        }

        for ty in &c.extends {
            guard.ensure(!ty.trim().is_empty(), || Violation::MissingType("extends"))?;
        }
        check_not_self(&guard, &c.name, "extends", c.extends.as_slice())?;
        check_not_self(&guard, &c.name, "with", &c.mixins)?;
        check_not_self(&guard, &c.name, "implements", &c.interfaces)?;
        check_mixins_and_interfaces(&guard, &c.mixins, &c.interfaces)?;
        check_constructor_owner(&guard, &c.name, &c.members)?;

        Ok(c)
    }
}

/// Fails if a constructor names a type other than its enclosing one.
pub(crate) fn check_constructor_owner(
    guard: &Guard<'_>,
    owner: &str,
    members: &[Member],
) -> Result<()> {
    for ctor in members.iter().filter_map(Member::as_constructor) {
        guard.ensure(ctor.class_name() == owner, || Violation::ForeignConstructor {
            expected: owner.to_string(),
            found: ctor.class_name().to_string(),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Constructor, Method, Param, Property};

    #[test]
    fn test_empty_class() {
        let c = Class::builder("Marker").build().unwrap();
        assert_eq!(c.render(), "class Marker {}\n");
    }

    #[test]
    fn test_header_order() {
        let c = Class::builder("Repo")
            .abstract_()
            .modifier(ClassModifier::Base)
            .type_param(TypeParam::new("T").bound("Entity"))
            .extends("Base<T>")
            .with("Logging")
            .implements("Disposable")
            .implements("Comparable<Repo<T>>")
            .build()
            .unwrap();
        assert_eq!(
            c.render(),
            "abstract base class Repo<T extends Entity> extends Base<T> with Logging implements Disposable, Comparable<Repo<T>> {}\n"
        );
    }

    #[test]
    fn test_mixin_class() {
        let c = Class::builder("Walker")
            .modifier(ClassModifier::Base)
            .mixin_class()
            .build()
            .unwrap();
        assert_eq!(c.render(), "base mixin class Walker {}\n");
    }

    #[test]
    fn test_class_with_members() {
        let x = Property::builder("x").final_().ty("int").build().unwrap();
        let ctor = Constructor::builder("Point")
            .const_()
            .param(Param::builder("x").field_formal().build().unwrap())
            .build()
            .unwrap();
        let to_string = Method::builder("toString")
            .override_()
            .returns("String")
            .arrow("'Point($x)'")
            .build()
            .unwrap();
        let c = Class::builder("Point")
            .doc("A point.")
            .annotation("immutable")
            .member(to_string)
            .member(ctor)
            .member(x)
            .build()
            .unwrap();
        assert_eq!(
            c.render(),
            "/// A point.\n@immutable\nclass Point {\n  final int x;\n\n  const Point(this.x);\n\n  @override\n  String toString() => 'Point($x)';\n}\n"
        );
    }

    #[test]
    fn test_class_rules() {
        let cases = [
            (
                Class::builder("A").abstract_().modifier(ClassModifier::Sealed),
                Violation::Conflict("sealed", "abstract"),
            ),
            (
                Class::builder("A").mixin_class().modifier(ClassModifier::Final),
                Violation::Conflict("mixin", "final"),
            ),
            (
                Class::builder("A").mixin_class().extends("B"),
                Violation::Conflict("mixin", "extends"),
            ),
            (
                Class::builder("A").extends("A"),
                Violation::SelfReference("A".into(), "extends"),
            ),
            (
                Class::builder("A").with("A"),
                Violation::SelfReference("A".into(), "with"),
            ),
            (
                Class::builder("A").implements("A<int>"),
                Violation::SelfReference("A".into(), "implements"),
            ),
            (
                Class::builder("A").with("M").implements("M"),
                Violation::MixinAndInterface("M".into()),
            ),
            (
                Class::builder("A").member(Constructor::builder("B").build().unwrap()),
                Violation::ForeignConstructor {
                    expected: "A".into(),
                    found: "B".into(),
                },
            ),
        ];
        for (builder, expected) in cases {
            assert_eq!(builder.build().unwrap_err().violation(), Some(&expected));
        }
    }

    #[test]
    fn test_every_single_modifier_is_legal() {
        for modifier in [
            ClassModifier::Base,
            ClassModifier::Interface,
            ClassModifier::Final,
            ClassModifier::Sealed,
        ] {
            assert!(Class::builder("A").modifier(modifier).build().is_ok());
        }
        assert!(Class::builder("A").abstract_().build().is_ok());
        assert!(Class::builder("A").mixin_class().build().is_ok());
    }
}
