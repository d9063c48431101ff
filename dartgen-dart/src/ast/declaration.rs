//! The top-level declaration union.

use dartgen_codegen::{CodeFragment, Renderable};

use super::{
    class::Class, enums::Enum, extension::Extension, method::Function, mixin::Mixin,
    variable::GlobalVariable,
};

/// A top-level declaration of a Dart library.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Declaration {
    Class(Class),
    Enum(Enum),
    Mixin(Mixin),
    Extension(Extension),
    Function(Function),
    Variable(GlobalVariable),
}

impl Declaration {
    /// The declared name; anonymous extensions have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Class(c) => Some(c.name()),
            Declaration::Enum(e) => Some(e.name()),
            Declaration::Mixin(m) => Some(m.name()),
            Declaration::Extension(e) => e.name(),
            Declaration::Function(f) => Some(f.name()),
            Declaration::Variable(v) => Some(v.name()),
        }
    }
}

impl Renderable for Declaration {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Declaration::Class(c) => c.to_fragments(),
            Declaration::Enum(e) => e.to_fragments(),
            Declaration::Mixin(m) => m.to_fragments(),
            Declaration::Extension(e) => e.to_fragments(),
            Declaration::Function(f) => f.to_fragments(),
            Declaration::Variable(v) => v.to_fragments(),
        }
    }
}

impl From<Class> for Declaration {
    fn from(c: Class) -> Self {
        Declaration::Class(c)
    }
}

impl From<Enum> for Declaration {
    fn from(e: Enum) -> Self {
        Declaration::Enum(e)
    }
}

impl From<Mixin> for Declaration {
    fn from(m: Mixin) -> Self {
        Declaration::Mixin(m)
    }
}

impl From<Extension> for Declaration {
    fn from(e: Extension) -> Self {
        Declaration::Extension(e)
    }
}

impl From<Function> for Declaration {
    fn from(f: Function) -> Self {
        Declaration::Function(f)
    }
}

impl From<GlobalVariable> for Declaration {
    fn from(v: GlobalVariable) -> Self {
        Declaration::Variable(v)
    }
}
