//! Rendering protocol shared by the dartgen node types.
//!
//! This crate knows nothing about Dart declarations. It provides the text
//! sink nodes render into and the contract for the external formatter that
//! post-processes a finished file.
//!
//! # Module Organization
//!
//! - [`builder`] - Sink, fragments and the [`Renderable`] contract
//! - [`format`] - Formatter contract and the `dart format` adapter

pub mod builder;
pub mod format;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use format::{DartFormat, Formatter, Passthrough};
