//! Parameters and parameter lists.
//!
//! A [`ParamList`] partitions parameters into the three groups Dart knows
//! (required positional, optional positional, named) and renders them with
//! the `[` / `{` bracket placed right after the last required parameter.

use std::fmt;

use dartgen_codegen::{CodeFragment, Renderable};

use crate::error::{Guard, NodeKind, Result, Violation};

/// The group a parameter belongs to within a parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamGroup {
    RequiredPositional,
    OptionalPositional,
    Named,
}

/// A validated parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    name: String,
    ty: Option<String>,
    named: bool,
    required: bool,
    optional: bool,
    field_formal: bool,
    super_formal: bool,
    default: Option<String>,
}

impl Param {
    /// Start building a required positional parameter.
    pub fn builder(name: impl Into<String>) -> ParamBuilder {
        ParamBuilder {
            node: Self {
                name: name.into(),
                ty: None,
                named: false,
                required: false,
                optional: false,
                field_formal: false,
                super_formal: false,
                default: None,
            },
        }
    }

    /// Copy this parameter into a builder for a modified version.
    pub fn to_builder(&self) -> ParamBuilder {
        ParamBuilder { node: self.clone() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// `this.name` form.
    pub fn is_field_formal(&self) -> bool {
        self.field_formal
    }

    /// `super.name` form.
    /// `this.name` or `super.name` for formal parameters.
    pub(crate) fn formal_text(&self) -> Option<String> {
        if self.field_formal {
            Some(format!("this.{}", self.name))
        } else if self.super_formal {
            Some(format!("super.{}", self.name))
        } else {
            None
        }
    }

    pub fn is_super_formal(&self) -> bool {
        self.super_formal
    }

    pub fn group(&self) -> ParamGroup {
        if self.named {
            ParamGroup::Named
        } else if self.optional {
            ParamGroup::OptionalPositional
        } else {
            ParamGroup::RequiredPositional
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.required {
            f.write_str("required ")?;
        }
        if self.field_formal {
            f.write_str("this.")?;
        } else if self.super_formal {
            f.write_str("super.")?;
        } else if let Some(ty) = &self.ty {
            write!(f, "{} ", ty)?;
        }
        f.write_str(&self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

impl Renderable for Param {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::raw(self.to_string())]
    }
}

/// Builder for [`Param`].
#[derive(Debug, Clone)]
pub struct ParamBuilder {
    node: Param,
}

impl ParamBuilder {
    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.node.ty = Some(ty.into());
        self
    }

    /// Make this a named parameter (`{...}` group).
    pub fn named(mut self) -> Self {
        self.node.named = true;
        self
    }

    /// Mark a named parameter as `required`.
    pub fn required(mut self) -> Self {
        self.node.required = true;
        self
    }

    /// Make this an optional positional parameter (`[...]` group).
    pub fn optional(mut self) -> Self {
        self.node.optional = true;
        self
    }

    /// Render as `this.name`, initializing the field of the same name.
    pub fn field_formal(mut self) -> Self {
        self.node.field_formal = true;
        self
    }

    /// Render as `super.name`, forwarding to the superclass constructor.
    pub fn super_formal(mut self) -> Self {
        self.node.super_formal = true;
        self
    }

    /// Set the default value expression.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.node.default = Some(value.into());
        self
    }

    pub fn build(self) -> Result<Param> {
        let p = self.node;
        let guard = Guard::new(NodeKind::Parameter, &p.name);

        guard.identifier(&p.name)?;
        guard.ensure(!(p.named && p.name.starts_with('_')), || {
            Violation::PrivateNamedParameter(p.name.clone())
        })?;
        guard.exclusive(("named", p.named), ("optional", p.optional))?;
        guard.implies(("required", p.required), ("named", p.named))?;
        guard.exclusive(("this", p.field_formal), ("super", p.super_formal))?;

        let may_default = p.optional || (p.named && !p.required);
        guard.ensure(p.default.is_none() || may_default, || {
            Violation::UnexpectedValue
        })?;

        Ok(p)
    }
}

/// Parameters partitioned into required positional, optional positional and
/// named groups, each keeping the relative order of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParamList {
    required: Vec<Param>,
    optional: Vec<Param>,
    named: Vec<Param>,
}

impl ParamList {
    /// Partition parameters into their groups.
    ///
    /// Partitioning itself never fails; owners call [`ParamList::check`]
    /// to enforce the rules that involve more than one parameter.
    pub fn partition(params: impl IntoIterator<Item = Param>) -> Self {
        let mut list = Self::default();
        for param in params {
            match param.group() {
                ParamGroup::RequiredPositional => list.required.push(param),
                ParamGroup::OptionalPositional => list.optional.push(param),
                ParamGroup::Named => list.named.push(param),
            }
        }
        list
    }

    pub fn required(&self) -> &[Param] {
        &self.required
    }

    pub fn optional(&self) -> &[Param] {
        &self.optional
    }

    pub fn named(&self) -> &[Param] {
        &self.named
    }

    /// All parameters, group by group.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.required
            .iter()
            .chain(&self.optional)
            .chain(&self.named)
    }

    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enforce the owner-level rules: optional positional and named groups
    /// are exclusive, and names are unique.
    pub(crate) fn check(&self, owner: &Guard<'_>) -> Result<()> {
        owner.ensure(self.optional.is_empty() || self.named.is_empty(), || {
            Violation::MixedOptionalAndNamed
        })?;
        let mut seen: Vec<&str> = Vec::with_capacity(self.len());
        for param in self.iter() {
            owner.ensure(!seen.contains(&param.name()), || {
                Violation::Duplicate("parameter", param.name().to_string())
            })?;
            seen.push(param.name());
        }
        Ok(())
    }

    /// Fails on `this.` / `super.` parameters, which only constructors take.
    pub(crate) fn check_no_formals(&self, owner: &Guard<'_>) -> Result<()> {
        for param in self.iter() {
            let prefix = if param.field_formal {
                "this"
            } else if param.super_formal {
                "super"
            } else {
                continue;
            };
            return Err(owner.fail(Violation::FormalOutsideConstructor(format!(
                "{}.{}",
                prefix,
                param.name()
            ))));
        }
        Ok(())
    }

    /// Render the parenthesized list.
    ///
    /// With `multiline`, a trailing comma follows the last parameter of the
    /// last rendered group so a formatter breaks the list one per line.
    pub fn to_source(&self, multiline: bool) -> String {
        let mut out = String::from("(");
        out.push_str(&join(&self.required));

        let (open, close, group) = if !self.optional.is_empty() {
            ('[', ']', &self.optional)
        } else if !self.named.is_empty() {
            ('{', '}', &self.named)
        } else {
            if multiline && !self.required.is_empty() {
                out.push(',');
            }
            out.push(')');
            return out;
        };

        if !self.required.is_empty() {
            out.push_str(", ");
        }
        out.push(open);
        out.push_str(&join(group));
        if multiline {
            out.push(',');
        }
        out.push(close);
        out.push(')');
        out
    }
}

fn join(params: &[Param]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
