//! Dart syntax nodes: parameters, initializers, members, declarations and
//! directives.
//!
//! Every node is created through a builder whose `build()` enforces Dart's
//! legality rules, and renders via [`dartgen_codegen::Renderable`].

mod accessors;
mod class;
mod common;
mod constructor;
mod declaration;
mod directives;
mod enums;
mod extension;
mod initializers;
mod member;
mod method;
mod mixin;
mod params;
mod property;
mod uri;
mod variable;

pub use accessors::{Getter, GetterBuilder, Setter, SetterBuilder};
pub use class::{Class, ClassBuilder, ClassModifier};
pub use common::{Body, Meta, TypeParam};
pub use constructor::{Constructor, ConstructorBuilder};
pub use declaration::Declaration;
pub use directives::{Directive, Export, ExportBuilder, Import, ImportBuilder, Part, PartOf};
pub use enums::{Enum, EnumBuilder, EnumConstant, EnumConstantBuilder};
pub use extension::{Extension, ExtensionBuilder};
pub use initializers::{Arguments, Initializer};
pub use member::Member;
pub use method::{Function, FunctionBuilder, Method, MethodBuilder};
pub use mixin::{Mixin, MixinBuilder};
pub use params::{Param, ParamBuilder, ParamGroup, ParamList};
pub use property::{Property, PropertyBuilder};
pub use uri::{UriReference, normalize};
pub use variable::{GlobalVariable, GlobalVariableBuilder};
