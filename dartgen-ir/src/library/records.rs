//! Declaration, member and parameter records.
//!
//! Flags are written as a `modifiers` list of Dart keywords, e.g.
//! `modifiers = ["static", "const"]`. Which keywords a record accepts is
//! checked when it is lowered.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::ValueRecord;

/// A keyword-like flag on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Abstract,
    Async,
    Base,
    Const,
    Covariant,
    Deferred,
    External,
    Factory,
    Final,
    Generator,
    Interface,
    Late,
    /// `mixin class`
    Mixin,
    Named,
    Optional,
    Override,
    Required,
    Sealed,
    Static,
    /// `super.name` parameter
    Super,
    /// `this.name` parameter
    This,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Abstract => "abstract",
            Modifier::Async => "async",
            Modifier::Base => "base",
            Modifier::Const => "const",
            Modifier::Covariant => "covariant",
            Modifier::Deferred => "deferred",
            Modifier::External => "external",
            Modifier::Factory => "factory",
            Modifier::Final => "final",
            Modifier::Generator => "generator",
            Modifier::Interface => "interface",
            Modifier::Late => "late",
            Modifier::Mixin => "mixin",
            Modifier::Named => "named",
            Modifier::Optional => "optional",
            Modifier::Override => "override",
            Modifier::Required => "required",
            Modifier::Sealed => "sealed",
            Modifier::Static => "static",
            Modifier::Super => "super",
            Modifier::This => "this",
        }
    }
}

/// Doc comment and annotations, flattened into each record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParamRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound: Option<String>,
}

/// A function body: `{ block = "..." }` or `{ arrow = "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRecord {
    Block(String),
    Arrow(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Default value expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// One constructor initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitializerRecord {
    Assert {
        condition: String,
        #[serde(default)]
        message: Option<String>,
    },
    Field {
        name: String,
        value: String,
    },
    Super {
        #[serde(default)]
        constructor: Option<String>,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        named: IndexMap<String, String>,
    },
    Redirect {
        #[serde(default)]
        constructor: Option<String>,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        named: IndexMap<String, String>,
    },
}

/// Signature fields shared by methods and functions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallableRecord {
    pub name: String,
    #[serde(flatten)]
    pub meta: MetaRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParamRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamRecord>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub multiline_params: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyRecord>,
}

/// A member of a class, enum, mixin or extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberRecord {
    Property {
        name: String,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        /// Initial value expression.
        #[serde(default)]
        default: Option<String>,
        /// Initial value as a constant.
        #[serde(default)]
        value: Option<ValueRecord>,
    },
    Getter {
        name: String,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        #[serde(default)]
        body: Option<BodyRecord>,
    },
    Setter {
        name: String,
        #[serde(flatten)]
        meta: MetaRecord,
        param: ParamRecord,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        #[serde(default)]
        body: Option<BodyRecord>,
    },
    Constructor {
        /// Owning type; defaults to the enclosing declaration.
        #[serde(default)]
        class: Option<String>,
        /// Constructor name for named constructors.
        #[serde(default)]
        name: Option<String>,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default)]
        params: Vec<ParamRecord>,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        #[serde(default)]
        multiline_params: bool,
        #[serde(default)]
        initializers: Vec<InitializerRecord>,
        #[serde(default)]
        body: Option<BodyRecord>,
    },
    Method(CallableRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstantRecord {
    pub name: String,
    #[serde(flatten)]
    pub meta: MetaRecord,
    #[serde(default)]
    pub constructor: Option<String>,
    /// Positional arguments; present (even empty) means the constant calls a
    /// constructor.
    #[serde(default)]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub named: IndexMap<String, String>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationRecord {
    Class {
        name: String,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        #[serde(default)]
        type_params: Vec<TypeParamRecord>,
        #[serde(default)]
        extends: Option<String>,
        #[serde(default)]
        with: Vec<String>,
        #[serde(default)]
        implements: Vec<String>,
        #[serde(default)]
        members: Vec<MemberRecord>,
    },
    Enum {
        name: String,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default)]
        type_params: Vec<TypeParamRecord>,
        #[serde(default)]
        with: Vec<String>,
        #[serde(default)]
        implements: Vec<String>,
        constants: Vec<EnumConstantRecord>,
        #[serde(default)]
        members: Vec<MemberRecord>,
    },
    Mixin {
        name: String,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        #[serde(default)]
        type_params: Vec<TypeParamRecord>,
        #[serde(default)]
        on: Vec<String>,
        #[serde(default)]
        implements: Vec<String>,
        #[serde(default)]
        members: Vec<MemberRecord>,
    },
    Extension {
        #[serde(default)]
        name: Option<String>,
        on: String,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default)]
        type_params: Vec<TypeParamRecord>,
        #[serde(default)]
        members: Vec<MemberRecord>,
    },
    Function(CallableRecord),
    Variable {
        name: String,
        #[serde(flatten)]
        meta: MetaRecord,
        #[serde(default, rename = "type")]
        ty: Option<String>,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        #[serde(default)]
        default: Option<String>,
        #[serde(default)]
        value: Option<ValueRecord>,
    },
}

/// A file within a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub package: String,
    pub path: String,
}

/// Where a directive points: a ready URI or an asset still to be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRecord {
    Uri(String),
    Asset(AssetRecord),
}

/// A directive. The owning `part of` is set in [`super::OutputRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectiveRecord {
    Import {
        #[serde(flatten)]
        target: TargetRecord,
        #[serde(default, rename = "as")]
        prefix: Option<String>,
        #[serde(default)]
        modifiers: Vec<Modifier>,
        #[serde(default)]
        show: Vec<String>,
        #[serde(default)]
        hide: Vec<String>,
    },
    Export {
        #[serde(flatten)]
        target: TargetRecord,
        #[serde(default)]
        show: Vec<String>,
        #[serde(default)]
        hide: Vec<String>,
    },
    Part {
        #[serde(flatten)]
        target: TargetRecord,
    },
}

/// The library a part file belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfRecord {
    /// `part of name;`
    Library(String),
    /// `part of 'uri';`
    Uri(String),
    /// Named when the owner declares a library name, by URI otherwise.
    Asset(AssetRecord),
}
