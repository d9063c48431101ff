//! Dart source synthesis.
//!
//! Build declarations with the node builders in [`ast`]; every builder
//! validates Dart's structural rules and fails with [`Error`] instead of
//! producing a node that would render invalid source. Built nodes render
//! through [`dartgen_codegen::Renderable`] and never fail.
//!
//! ```
//! use dartgen_codegen::Renderable;
//! use dartgen_dart::ast::Property;
//!
//! let field = Property::builder("maxRetries")
//!     .static_()
//!     .const_()
//!     .ty("int")
//!     .default_value("3")
//!     .build()?;
//! assert_eq!(field.render(), "static const int maxRetries = 3;\n");
//! # Ok::<(), dartgen_dart::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`ast`] - Parameter, initializer, member, declaration and directive nodes
//! - [`values`] - Constant values and the custom converter registry
//! - [`resolve`] - Deferred directives and path / library-name resolvers
//! - [`code_file`] - Whole-file layout and output

pub mod ast;
pub mod code_file;
mod error;
pub mod resolve;
pub mod values;

pub use code_file::{DartFile, DartOutput, RenderOptions};
pub use error::{Error, LookupError, NodeKind, Result, Violation};
pub use resolve::{
    AssetId, LibraryNameResolver, LibraryNames, PackageResolver, PathResolver, PendingDirective,
    ResolveContext,
};
pub use values::{ConstValue, Converter, ConverterRegistry, CustomFields, TypeTag};
