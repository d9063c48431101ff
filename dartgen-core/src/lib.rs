//! Core utilities shared by the dartgen crates.
//!
//! This crate holds the Dart lexical rules the node types validate against,
//! the generated-file banner, and writing rendered files to disk.

mod file;
mod header;
mod lexical;

// File operations
pub use file::{File, FileRules, GeneratedFile, Overwrite, WriteResult};
pub use header::{BANNER_WIDTH, GENERATED_NOTICE, banner};
// Lexical rules
pub use lexical::{
    RESERVED_WORDS, base_type_name, is_identifier, is_reserved_word, quote_string,
};
