//! The member union and the shared body layout of type declarations.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    accessors::{Getter, Setter},
    constructor::Constructor,
    method::Method,
    property::Property,
};

/// A member of a class, enum, mixin or extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Property(Property),
    Getter(Getter),
    Setter(Setter),
    Constructor(Constructor),
    Method(Method),
}

impl Member {
    /// Position of this member's kind in a rendered body.
    pub fn rank(&self) -> u8 {
        match self {
            Member::Property(_) => 0,
            Member::Getter(_) => 1,
            Member::Setter(_) => 2,
            Member::Constructor(_) => 3,
            Member::Method(_) => 4,
        }
    }

    pub fn as_constructor(&self) -> Option<&Constructor> {
        match self {
            Member::Constructor(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, Member::Constructor(_))
    }

    /// True for a field that is not `static`.
    pub fn is_instance_field(&self) -> bool {
        matches!(self, Member::Property(p) if !p.is_static())
    }
}

impl Renderable for Member {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Member::Property(p) => p.to_fragments(),
            Member::Getter(g) => g.to_fragments(),
            Member::Setter(s) => s.to_fragments(),
            Member::Constructor(c) => c.to_fragments(),
            Member::Method(m) => m.to_fragments(),
        }
    }
}

impl From<Property> for Member {
    fn from(p: Property) -> Self {
        Member::Property(p)
    }
}

impl From<Getter> for Member {
    fn from(g: Getter) -> Self {
        Member::Getter(g)
    }
}

impl From<Setter> for Member {
    fn from(s: Setter) -> Self {
        Member::Setter(s)
    }
}

impl From<Constructor> for Member {
    fn from(c: Constructor) -> Self {
        Member::Constructor(c)
    }
}

impl From<Method> for Member {
    fn from(m: Method) -> Self {
        Member::Method(m)
    }
}

/// Lay out members in kind order, keeping insertion order within a kind.
///
/// Members are separated by a blank line, except that consecutive fields
/// stay together.
pub(crate) fn member_fragments(members: &[Member]) -> Vec<CodeFragment> {
    let mut sorted: Vec<&Member> = members.iter().collect();
    sorted.sort_by_key(|m| m.rank());

    let mut fragments = Vec::new();
    let mut previous: Option<&Member> = None;
    for member in sorted {
        if let Some(prev) = previous {
            let fields = matches!(
                (prev, member),
                (Member::Property(_), Member::Property(_))
            );
            if !fields {
                fragments.push(CodeFragment::blank());
            }
        }
        fragments.extend(member.to_fragments());
        previous = Some(member);
    }
    fragments
}

/// Wrap a body in `header {` ... `}`, or `header {}` when empty.
pub(crate) fn braced(header: String, body: Vec<CodeFragment>) -> CodeFragment {
    if body.is_empty() {
        CodeFragment::line(format!("{} {{}}", header))
    } else {
        CodeFragment::block(format!("{} {{", header), body, Some("}".to_string()))
    }
}
