//! Constructor initializer list entries and call arguments.

use std::fmt;

use dartgen_codegen::{CodeFragment, Renderable};

/// Call arguments: positional expressions followed by `label: value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Arguments {
    positional: Vec<String>,
    named: Vec<(String, String)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build positional arguments from expressions.
    pub fn positional<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: args.into_iter().map(Into::into).collect(),
            named: Vec::new(),
        }
    }

    /// Add a positional argument.
    pub fn arg(mut self, expr: impl Into<String>) -> Self {
        self.positional.push(expr.into());
        self
    }

    /// Add a named argument.
    pub fn named(mut self, label: impl Into<String>, expr: impl Into<String>) -> Self {
        self.named.push((label.into(), expr.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .positional
            .iter()
            .cloned()
            .chain(
                self.named
                    .iter()
                    .map(|(label, value)| format!("{}: {}", label, value)),
            )
            .collect::<Vec<_>>();
        f.write_str(&parts.join(", "))
    }
}

/// One entry of a constructor's initializer list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Initializer {
    /// `assert(condition[, message])`
    Assert {
        condition: String,
        message: Option<String>,
    },
    /// `field = value`
    Field { name: String, value: String },
    /// `super[.name](args)`
    Super {
        constructor: Option<String>,
        args: Arguments,
    },
    /// `this[.name](args)`, which must be the only entry.
    Redirect {
        constructor: Option<String>,
        args: Arguments,
    },
}

impl Initializer {
    pub fn assert(condition: impl Into<String>) -> Self {
        Self::Assert {
            condition: condition.into(),
            message: None,
        }
    }

    pub fn assert_with_message(condition: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Assert {
            condition: condition.into(),
            message: Some(message.into()),
        }
    }

    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Call the unnamed superclass constructor.
    pub fn super_call(args: Arguments) -> Self {
        Self::Super {
            constructor: None,
            args,
        }
    }

    /// Call a named superclass constructor.
    pub fn super_named(constructor: impl Into<String>, args: Arguments) -> Self {
        Self::Super {
            constructor: Some(constructor.into()),
            args,
        }
    }

    /// Redirect to the unnamed constructor of the same class.
    pub fn redirect(args: Arguments) -> Self {
        Self::Redirect {
            constructor: None,
            args,
        }
    }

    /// Redirect to a named constructor of the same class.
    pub fn redirect_to(constructor: impl Into<String>, args: Arguments) -> Self {
        Self::Redirect {
            constructor: Some(constructor.into()),
            args,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    pub fn is_super(&self) -> bool {
        matches!(self, Self::Super { .. })
    }

    /// The field or constructor name this entry refers to, if any.
    pub(crate) fn target_name(&self) -> Option<&str> {
        match self {
            Self::Assert { .. } => None,
            Self::Field { name, .. } => Some(name),
            Self::Super { constructor, .. } | Self::Redirect { constructor, .. } => {
                constructor.as_deref()
            }
        }
    }

    /// Position in the rendered list: asserts, field assignments, super call.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Assert { .. } => 0,
            Self::Field { .. } => 1,
            Self::Super { .. } => 2,
            Self::Redirect { .. } => 3,
        }
    }
}

impl fmt::Display for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assert {
                condition,
                message: Some(message),
            } => write!(f, "assert({}, {})", condition, message),
            Self::Assert { condition, .. } => write!(f, "assert({})", condition),
            Self::Field { name, value } => write!(f, "{} = {}", name, value),
            Self::Super { constructor, args } => write_call(f, "super", constructor, args),
            Self::Redirect { constructor, args } => write_call(f, "this", constructor, args),
        }
    }
}

fn write_call(
    f: &mut fmt::Formatter<'_>,
    target: &str,
    constructor: &Option<String>,
    args: &Arguments,
) -> fmt::Result {
    match constructor {
        Some(name) => write!(f, "{}.{}({})", target, name, args),
        None => write!(f, "{}({})", target, args),
    }
}

impl Renderable for Initializer {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::raw(self.to_string())]
    }
}
