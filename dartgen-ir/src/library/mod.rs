//! Serializable description of a Dart library.
//!
//! A [`Library`] is read from TOML or JSON and lowered into a
//! [`dartgen_dart::DartFile`] with [`crate::lower`].

mod records;
mod value;

use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

pub use records::*;
pub use value::{EntryRecord, ValueRecord};

use crate::{Error, Result, SourceContext};

/// Root record for one generated file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Library {
    #[serde(default)]
    pub output: OutputRecord,

    #[serde(default)]
    pub directives: Vec<DirectiveRecord>,

    #[serde(default)]
    pub declarations: Vec<DeclarationRecord>,
}

/// How the file is laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputRecord {
    /// Generator named in the header banner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Spaces per indentation level; `0` indents with tabs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of: Option<PartOfRecord>,

    /// The file being generated, used to resolve asset directives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRecord>,
}

impl FromStr for Library {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml_str(s, "library.toml")
    }
}

impl Library {
    /// Read a library from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content, &filename),
            _ => Self::from_toml_str(&content, &filename),
        }
    }

    /// Parse TOML, naming `filename` in errors.
    pub fn from_toml_str(content: &str, filename: &str) -> Result<Self> {
        let library: Self = toml::from_str(content)
            .map_err(|e| SourceContext::new(content, filename).toml_error(e))?;
        tracing::debug!(
            file = filename,
            declarations = library.declarations.len(),
            "parsed library"
        );
        Ok(library)
    }

    /// Parse JSON, naming `filename` in errors.
    pub fn from_json_str(content: &str, filename: &str) -> Result<Self> {
        let library: Self = serde_json::from_str(content)
            .map_err(|e| SourceContext::new(content, filename).json_error(e))?;
        tracing::debug!(
            file = filename,
            declarations = library.declarations.len(),
            "parsed library"
        );
        Ok(library)
    }

    /// Serialize back to pretty TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_library() {
        let library: Library = "".parse().unwrap();
        assert_eq!(library, Library::default());
    }

    #[test]
    fn test_output_table() {
        let library: Library = r#"
[output]
generator = "ModelGenerator"
indent = 4
part_of = { uri = "user.dart" }
"#
        .parse()
        .unwrap();
        assert_eq!(library.output.generator.as_deref(), Some("ModelGenerator"));
        assert_eq!(library.output.indent, Some(4));
        assert_eq!(
            library.output.part_of,
            Some(PartOfRecord::Uri("user.dart".into()))
        );
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let err = "[output]\nbanner = \"x\"\n".parse::<Library>().unwrap_err();
        assert!(matches!(*err, Error::Parse { span: Some(_), .. }), "{err:?}");
    }

    #[test]
    fn test_declarations_by_kind() {
        let library: Library = r#"
[[declarations]]
kind = "class"
name = "User"
modifiers = ["final"]

[[declarations.members]]
kind = "property"
name = "id"
type = "int"
modifiers = ["final"]

[[declarations]]
kind = "enum"
name = "Role"
constants = [{ name = "admin" }, { name = "member" }]
"#
        .parse()
        .unwrap();

        assert_eq!(library.declarations.len(), 2);
        match &library.declarations[0] {
            DeclarationRecord::Class {
                name,
                modifiers,
                members,
                ..
            } => {
                assert_eq!(name, "User");
                assert_eq!(modifiers, &[Modifier::Final]);
                assert_eq!(members.len(), 1);
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_json_library() {
        let library = Library::from_json_str(
            r#"{
  "directives": [{ "kind": "import", "uri": "dart:async" }],
  "declarations": [{ "kind": "function", "name": "main", "returns": "void", "body": { "block": "run();" } }]
}"#,
            "lib.json",
        )
        .unwrap();
        assert_eq!(
            library.directives[0],
            DirectiveRecord::Import {
                target: TargetRecord::Uri("dart:async".into()),
                prefix: None,
                modifiers: Vec::new(),
                show: Vec::new(),
                hide: Vec::new(),
            }
        );
        match &library.declarations[0] {
            DeclarationRecord::Function(callable) => {
                assert_eq!(callable.body, Some(BodyRecord::Block("run();".into())));
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        std::fs::write(&path, r#"{ "output": { "generator": "G" } }"#).unwrap();
        let library = Library::from_file(&path).unwrap();
        assert_eq!(library.output.generator.as_deref(), Some("G"));

        let missing = Library::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(*missing, Error::Io { .. }));
    }
}
