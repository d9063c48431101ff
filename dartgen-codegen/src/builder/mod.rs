//! Rendering building blocks.
//!
//! - [`CodeBuilder`] - Text sink that owns indentation
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Contract every node implements to write itself into a sink
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
