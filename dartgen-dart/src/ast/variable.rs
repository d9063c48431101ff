//! Top-level variables.

use dartgen_codegen::{CodeFragment, Renderable};

use super::common::{Meta, keywords};
use crate::error::{Guard, NodeKind, Result, Violation};

/// A top-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalVariable {
    name: String,
    meta: Meta,
    ty: Option<String>,
    is_external: bool,
    is_late: bool,
    is_const: bool,
    is_final: bool,
    value: Option<String>,
}

impl GlobalVariable {
    pub fn builder(name: impl Into<String>) -> GlobalVariableBuilder {
        GlobalVariableBuilder {
            node: Self {
                name: name.into(),
                meta: Meta::default(),
                ty: None,
                is_external: false,
                is_late: false,
                is_const: false,
                is_final: false,
                value: None,
            },
        }
    }

    pub fn to_builder(&self) -> GlobalVariableBuilder {
        GlobalVariableBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    fn declaration(&self) -> String {
        let mut out = keywords(&[
            ("external", self.is_external),
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
        if let Some(value) = &self.value {
            out.push_str(" = ");
            out.push_str(value);
        }
        out.push(';');
        out
    }
}

impl Renderable for GlobalVariable {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.meta.to_fragments();
        fragments.push(CodeFragment::line(self.declaration()));
        fragments
    }
}

/// Builder for [`GlobalVariable`].
#[derive(Debug, Clone)]
pub struct GlobalVariableBuilder {
    node: GlobalVariable,
}

impl GlobalVariableBuilder {
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

    pub fn external(mut self) -> Self {
        self.node.is_external = true;
        self
    }

    pub fn late(mut self) -> Self {
        self.node.is_late = true;
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

    pub fn value(mut self, expr: impl Into<String>) -> Self {
        self.node.value = Some(expr.into());
        self
    }

    pub fn build(self) -> Result<GlobalVariable> {
        let v = self.node;
        let guard = Guard::new(NodeKind::Variable, &v.name);

        guard.identifier(&v.name)?;
        guard.exclusive(("const", v.is_const), ("final", v.is_final))?;
        guard.exclusive(("const", v.is_const), ("late", v.is_late))?;
        guard.exclusive(("const", v.is_const), ("external", v.is_external))?;
        guard.exclusive(("late", v.is_late), ("external", v.is_external))?;
        guard.ensure(!v.is_const || v.value.is_some(), || Violation::MissingValue)?;
        guard.ensure(!v.is_external || v.value.is_none(), || {
            Violation::UnexpectedValue
        })?;
        let plain_final = v.is_final && !v.is_late && !v.is_external;
        guard.ensure(!plain_final || v.value.is_some(), || Violation::MissingValue)?;

        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_order_and_inference() {
        let c = GlobalVariable::builder("pi")
            .const_()
            .value("3.14")
            .build()
            .unwrap();
        assert_eq!(c.render(), "const pi = 3.14;\n");

        let v = GlobalVariable::builder("counter").value("0").build().unwrap();
        assert_eq!(v.render(), "var counter = 0;\n");

        let l = GlobalVariable::builder("config")
            .late()
            .final_()
            .ty("Config")
            .build()
            .unwrap();
        assert_eq!(l.render(), "late final Config config;\n");

        let e = GlobalVariable::builder("errno")
            .external()
            .ty("int")
            .build()
            .unwrap();
        assert_eq!(e.render(), "external int errno;\n");
    }

    #[test]
    fn test_variable_rules() {
        let cases = [
            (
                GlobalVariable::builder("x").const_().final_().value("1"),
                Violation::Conflict("const", "final"),
            ),
            (
                GlobalVariable::builder("x").const_().late().value("1"),
                Violation::Conflict("const", "late"),
            ),
            (
                GlobalVariable::builder("x").late().external(),
                Violation::Conflict("late", "external"),
            ),
            (GlobalVariable::builder("x").const_(), Violation::MissingValue),
            (GlobalVariable::builder("x").final_(), Violation::MissingValue),
            (
                GlobalVariable::builder("x").external().value("1"),
                Violation::UnexpectedValue,
            ),
        ];
        for (builder, expected) in cases {
            assert_eq!(builder.build().unwrap_err().violation(), Some(&expected));
        }
    }
}
