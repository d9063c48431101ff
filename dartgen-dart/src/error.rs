//! Error types for node construction and collaborator lookups.
//!
//! Structural violations are detected when a node is built; rendering a
//! built node never fails.

use std::fmt;

use dartgen_core::{is_identifier, is_reserved_word};
use thiserror::Error;

/// Result type for node construction.
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of node an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Parameter,
    TypeParameter,
    Property,
    Getter,
    Setter,
    Method,
    Constructor,
    Class,
    Enum,
    EnumConstant,
    Mixin,
    Extension,
    Function,
    Variable,
    Directive,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Parameter => "parameter",
            NodeKind::TypeParameter => "type parameter",
            NodeKind::Property => "property",
            NodeKind::Getter => "getter",
            NodeKind::Setter => "setter",
            NodeKind::Method => "method",
            NodeKind::Constructor => "constructor",
            NodeKind::Class => "class",
            NodeKind::Enum => "enum",
            NodeKind::EnumConstant => "enum constant",
            NodeKind::Mixin => "mixin",
            NodeKind::Extension => "extension",
            NodeKind::Function => "function",
            NodeKind::Variable => "variable",
            NodeKind::Directive => "directive",
        };
        f.write_str(name)
    }
}

/// A legality rule a node's field combination breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("named parameter '{0}' cannot be private")]
    PrivateNamedParameter(String),

    #[error("'{0}' is a reserved word")]
    ReservedWord(String),

    #[error("'{0}' cannot be combined with '{1}'")]
    Conflict(&'static str, &'static str),

    #[error("'{0}' requires '{1}'")]
    Requires(&'static str, &'static str),

    #[error("an initial value is required")]
    MissingValue,

    #[error("an initial value is not allowed here")]
    UnexpectedValue,

    #[error("a body is required")]
    MissingBody,

    #[error("a body is not allowed here")]
    UnexpectedBody,

    #[error("the {0} clause needs a type")]
    MissingType(&'static str),

    #[error("duplicate {0} '{1}'")]
    Duplicate(&'static str, String),

    #[error("optional positional and named parameters cannot be mixed")]
    MixedOptionalAndNamed,

    #[error("'{0}' is only allowed in constructors")]
    FormalOutsideConstructor(String),

    #[error("a setter takes exactly one required positional parameter")]
    SetterParameter,

    #[error("'{0}' cannot reference itself in its {1} clause")]
    SelfReference(String, &'static str),

    #[error("'{0}' appears in both the with and implements clauses")]
    MixinAndInterface(String),

    #[error("a redirecting constructor cannot have other initializers or a body")]
    RedirectNotAlone,

    #[error("at most one super initializer is allowed")]
    MultipleSuperCalls,

    #[error("'{formal}' is not allowed in a {constructor} constructor")]
    MisplacedFormal {
        formal: String,
        constructor: &'static str,
    },

    #[error("{0} constructors cannot have an initializer list")]
    UnexpectedInitializers(&'static str),

    #[error("constructor of '{found}' declared inside '{expected}'")]
    ForeignConstructor { expected: String, found: String },

    #[error("an enum needs at least one constant")]
    EmptyEnum,

    #[error("enum constants pass arguments but no constructor is declared")]
    MissingEnumConstructor,

    #[error("{0} cannot declare {1}")]
    IllegalMember(&'static str, &'static str),

    #[error("'{0}' is not allowed on {1}")]
    IllegalModifier(&'static str, &'static str),
}

/// A failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no converter registered for type tag '{0}'")]
    MissingConverter(String),

    #[error("a converter is already registered for type tag '{0}'")]
    DuplicateConverter(String),

    #[error("unknown asset {0}")]
    UnknownAsset(String),

    #[error("asset {asset} cannot be referenced from {from}")]
    UnreachableAsset { asset: String, from: String },

    #[error("the library name of {0} is unknown")]
    UnknownLibrary(String),
}

/// The main error type for node construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid {kind} '{name}': {violation}")]
    Structural {
        kind: NodeKind,
        name: String,
        violation: Violation,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Error {
    /// Create a structural violation error.
    pub fn structural(kind: NodeKind, name: impl Into<String>, violation: Violation) -> Self {
        Self::Structural {
            kind,
            name: name.into(),
            violation,
        }
    }

    /// The violated rule, if this is a structural error.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Structural { violation, .. } => Some(violation),
            Self::Lookup(_) => None,
        }
    }

    /// Returns true if this is a structural error.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }
}

/// Checks legality rules on behalf of one node.
///
/// Every failure is attributed to the node's kind and name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Guard<'a> {
    kind: NodeKind,
    name: &'a str,
}

impl<'a> Guard<'a> {
    pub(crate) fn new(kind: NodeKind, name: &'a str) -> Self {
        Self { kind, name }
    }

    pub(crate) fn fail(&self, violation: Violation) -> Error {
        Error::structural(self.kind, self.name, violation)
    }

    pub(crate) fn ensure(&self, condition: bool, violation: impl FnOnce() -> Violation) -> Result<()> {
        if condition {
            Ok(())
        } else {
            Err(self.fail(violation()))
        }
    }

    /// Fails when both flags are set.
    pub(crate) fn exclusive(&self, a: (&'static str, bool), b: (&'static str, bool)) -> Result<()> {
        self.ensure(!(a.1 && b.1), || Violation::Conflict(a.0, b.0))
    }

    /// Fails when the first flag is set without the second.
    pub(crate) fn implies(&self, a: (&'static str, bool), b: (&'static str, bool)) -> Result<()> {
        self.ensure(!a.1 || b.1, || Violation::Requires(a.0, b.0))
    }

    /// Fails unless `name` is a usable Dart identifier.
    pub(crate) fn identifier(&self, name: &str) -> Result<()> {
        self.ensure(is_identifier(name), || {
            Violation::InvalidIdentifier(name.to_string())
        })?;
        self.ensure(!is_reserved_word(name), || {
            Violation::ReservedWord(name.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_message() {
        let err = Error::structural(
            NodeKind::Property,
            "maxRetries",
            Violation::Conflict("const", "late"),
        );
        assert_eq!(
            err.to_string(),
            "invalid property 'maxRetries': 'const' cannot be combined with 'late'"
        );
        assert!(err.is_structural());
    }

    #[test]
    fn test_lookup_is_transparent() {
        let err = Error::from(LookupError::MissingConverter("Duration".into()));
        assert_eq!(
            err.to_string(),
            "no converter registered for type tag 'Duration'"
        );
        assert!(err.violation().is_none());
    }

    #[test]
    fn test_guard_rules() {
        let guard = Guard::new(NodeKind::Method, "run");
        assert!(guard.exclusive(("a", true), ("b", false)).is_ok());
        assert!(guard.exclusive(("a", true), ("b", true)).is_err());
        assert!(guard.implies(("required", false), ("named", false)).is_ok());
        assert_eq!(
            guard
                .implies(("required", true), ("named", false))
                .unwrap_err()
                .violation(),
            Some(&Violation::Requires("required", "named"))
        );
        assert!(guard.identifier("value").is_ok());
        assert!(guard.identifier("class").is_err());
        assert!(guard.identifier("1st").is_err());
    }
}
