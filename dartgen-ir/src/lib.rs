// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Plain data records describing a Dart library, and their lowering into
//! `dartgen-dart` nodes.
//!
//! Extraction tools produce a [`Library`] (usually as TOML or JSON); this
//! crate validates it into a [`dartgen_dart::DartFile`]:
//!
//! ```
//! use dartgen_ir::Library;
//!
//! let library: Library = r#"
//! [[declarations]]
//! kind = "variable"
//! name = "maxRetries"
//! type = "int"
//! modifiers = ["const"]
//! default = "3"
//! "#
//! .parse()?;
//! assert_eq!(library.lower()?.render(), "const int maxRetries = 3;\n");
//! # Ok::<(), Box<dartgen_ir::Error>>(())
//! ```

mod error;
pub mod library;
mod lower;

pub use error::{Error, Result, SourceContext};
pub use library::Library;
pub use lower::LowerContext;
