//! Pieces shared by member and declaration nodes.

use std::fmt;

use dartgen_codegen::CodeFragment;
use dartgen_core::base_type_name;

use crate::error::{Guard, NodeKind, Result, Violation};

/// Doc comment and annotations attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Meta {
    pub doc: Option<String>,
    pub annotations: Vec<String>,
}

impl Meta {
    pub(crate) fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc.clone()));
        }
        for annotation in &self.annotations {
            fragments.push(CodeFragment::line(annotation_text(annotation)));
        }
        fragments
    }
}

fn annotation_text(annotation: &str) -> String {
    let annotation = annotation.trim();
    if annotation.starts_with('@') {
        annotation.to_string()
    } else {
        format!("@{}", annotation)
    }
}

/// A generic type parameter, e.g. `T extends num`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParam {
    name: String,
    bound: Option<String>,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: None,
        }
    }

    /// Set the upper bound (`extends` clause).
    pub fn bound(mut self, bound: impl Into<String>) -> Self {
        self.bound = Some(bound.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bound {
            Some(bound) => write!(f, "{} extends {}", self.name, bound),
            None => f.write_str(&self.name),
        }
    }
}

/// Render `<A, B extends C>`, or nothing for an empty list.
pub(crate) fn type_params_text(params: &[TypeParam]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let inner = params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("<{}>", inner)
}

pub(crate) fn check_type_params(params: &[TypeParam]) -> Result<()> {
    let mut seen: Vec<&str> = Vec::new();
    for param in params {
        let guard = Guard::new(NodeKind::TypeParameter, &param.name);
        guard.identifier(&param.name)?;
        guard.ensure(!seen.contains(&param.name.as_str()), || {
            Violation::Duplicate("type parameter", param.name.clone())
        })?;
        seen.push(&param.name);
    }
    Ok(())
}

/// Fails if `owner` names itself in one of its supertype clauses.
pub(crate) fn check_not_self(guard: &Guard<'_>, owner: &str, clause: &'static str, types: &[String]) -> Result<()> {
    for ty in types {
        guard.ensure(base_type_name(ty) != owner, || {
            Violation::SelfReference(owner.to_string(), clause)
        })?;
    }
    Ok(())
}

/// Fails if a type is listed both as a mixin and as an interface.
pub(crate) fn check_mixins_and_interfaces(guard: &Guard<'_>, mixins: &[String], interfaces: &[String]) -> Result<()> {
    for mixin in mixins {
        let base = base_type_name(mixin);
        guard.ensure(
            !interfaces.iter().any(|i| base_type_name(i) == base),
            || Violation::MixinAndInterface(base.to_string()),
        )?;
    }
    Ok(())
}

/// Render ` keyword A, B` for a non-empty supertype list.
pub(crate) fn clause_text(keyword: &str, types: &[String]) -> String {
    if types.is_empty() {
        String::new()
    } else {
        format!(" {} {}", keyword, types.join(", "))
    }
}

/// A function body, supplied as pre-formatted source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Body {
    /// `{ ... }` holding statements.
    Block(String),
    /// `=> expression;`
    Arrow(String),
}

impl Body {
    pub fn is_arrow(&self) -> bool {
        matches!(self, Body::Arrow(_))
    }
}

/// The keyword that follows a signature for the async/generator combination.
pub(crate) fn body_modifier(is_async: bool, is_generator: bool) -> Option<&'static str> {
    match (is_async, is_generator) {
        (false, false) => None,
        (true, false) => Some("async"),
        (false, true) => Some("sync*"),
        (true, true) => Some("async*"),
    }
}

/// Shared rules for anything with an optional body and external flag.
pub(crate) fn check_callable(
    guard: &Guard<'_>,
    is_external: bool,
    is_async: bool,
    is_generator: bool,
    body: Option<&Body>,
) -> Result<()> {
    if is_external {
        guard.ensure(body.is_none(), || Violation::UnexpectedBody)?;
        guard.exclusive(("external", true), ("async", is_async))?;
        guard.exclusive(("external", true), ("generator", is_generator))?;
    } else {
        guard.ensure(body.is_some(), || Violation::MissingBody)?;
    }
    guard.exclusive(
        ("=>", body.is_some_and(Body::is_arrow)),
        ("generator", is_generator),
    )
}

/// Render a signature followed by its body, or `;` when there is none.
pub(crate) fn with_body(signature: String, body: Option<&Body>) -> Vec<CodeFragment> {
    match body {
        None => vec![CodeFragment::line(format!("{};", signature))],
        Some(Body::Arrow(expr)) => {
            CodeFragment::lines(&format!("{} => {};", signature, expr.trim()))
        }
        Some(Body::Block(text)) if text.trim().is_empty() => {
            vec![CodeFragment::line(format!("{} {{}}", signature))]
        }
        Some(Body::Block(text)) => vec![CodeFragment::block(
            format!("{} {{", signature),
            CodeFragment::lines(text.trim_matches('\n')),
            Some("}".to_string()),
        )],
    }
}

/// Prefix each keyword whose flag is set, in the given order.
pub(crate) fn keywords(flags: &[(&str, bool)]) -> String {
    flags
        .iter()
        .filter(|(_, set)| *set)
        .map(|(kw, _)| format!("{} ", kw))
        .collect()
}
