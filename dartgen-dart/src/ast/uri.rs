//! URI references used by directives.

use std::fmt;

/// Normalize path separators to `/`.
///
/// Applying this twice yields the same result as applying it once.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// A URI embedded in a directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UriReference {
    /// Used as given, e.g. `dart:async` or `/abs/path.dart`.
    Absolute(String),
    /// A path relative to the referencing file.
    Relative(String),
    /// `package:name/path`.
    Package { package: String, path: String },
}

impl UriReference {
    pub fn absolute(uri: impl AsRef<str>) -> Self {
        Self::Absolute(normalize(uri.as_ref()))
    }

    /// A relative path used verbatim.
    pub fn relative_path(path: impl AsRef<str>) -> Self {
        Self::Relative(normalize(path.as_ref()))
    }

    /// The path of `target` as seen from the directory containing `from_file`.
    ///
    /// Both paths are relative to the same root.
    pub fn relative(target: impl AsRef<str>, from_file: impl AsRef<str>) -> Self {
        let target = segments(&normalize(target.as_ref()));
        let mut base = segments(&normalize(from_file.as_ref()));
        base.pop();

        let common = target
            .iter()
            .zip(&base)
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = vec![".."; base.len() - common];
        parts.extend(target[common..].iter().map(String::as_str));
        Self::Relative(parts.join("/"))
    }

    /// A `package:` URI; a leading `/` on `path` is dropped.
    pub fn package(package: impl Into<String>, path: impl AsRef<str>) -> Self {
        let path = normalize(path.as_ref());
        Self::Package {
            package: package.into(),
            path: path.trim_start_matches('/').to_string(),
        }
    }

    /// Build a reference from a string, recognizing the `package:` form.
    pub fn parse(uri: impl AsRef<str>) -> Self {
        let uri = normalize(uri.as_ref());
        match uri.strip_prefix("package:").and_then(|rest| rest.split_once('/')) {
            Some((package, path)) => Self::package(package, path),
            None if uri.contains(':') || uri.starts_with('/') => Self::Absolute(uri),
            None => Self::Relative(uri),
        }
    }

    pub fn is_package(&self) -> bool {
        matches!(self, Self::Package { .. })
    }
}

/// Split into path segments, resolving `.` and `..`.
fn segments(path: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." if out.last().is_some_and(|s| s != "..") => {
                out.pop();
            }
            other => out.push(other.to_string()),
        }
    }
    out
}

impl fmt::Display for UriReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(uri) | Self::Relative(uri) => f.write_str(uri),
            Self::Package { package, path } => write!(f, "package:{}/{}", package, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize(r"lib\src\model.dart"), "lib/src/model.dart");
        assert_eq!(
            UriReference::absolute(r"C:\work\a.dart").to_string(),
            "C:/work/a.dart"
        );
    }

    #[test]
    fn test_package() {
        let uri = UriReference::package("flutter", "material.dart");
        assert_eq!(uri.to_string(), "package:flutter/material.dart");
        assert_eq!(
            UriReference::package("app", r"\src\a.dart").to_string(),
            "package:app/src/a.dart"
        );
    }

    #[test]
    fn test_relative_same_dir() {
        let uri = UriReference::relative("lib/src/user.dart", "lib/src/user.g.dart");
        assert_eq!(uri.to_string(), "user.dart");
    }

    #[test]
    fn test_relative_sibling_dir() {
        let uri = UriReference::relative("lib/models/user.dart", "lib/src/api/client.dart");
        assert_eq!(uri.to_string(), "../../models/user.dart");
    }

    #[test]
    fn test_relative_subdir_and_windows_input() {
        let uri = UriReference::relative(r"lib\src\a\b.dart", r"lib\src\main.dart");
        assert_eq!(uri.to_string(), "a/b.dart");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            UriReference::parse("package:meta/meta.dart"),
            UriReference::package("meta", "meta.dart")
        );
        assert_eq!(
            UriReference::parse("dart:async"),
            UriReference::Absolute("dart:async".into())
        );
        assert_eq!(
            UriReference::parse("src/a.dart"),
            UriReference::Relative("src/a.dart".into())
        );
    }
}
