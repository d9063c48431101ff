use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

/// Result type for record parsing and lowering (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source content and filename, kept for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn toml_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a parse error from a JSON error, pointing at its line and column.
    pub fn json_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = (source.line() > 0).then(|| {
            let offset = SourceOffset::from_location(&self.src, source.line(), source.column());
            SourceSpan::new(offset, 0)
        });
        Box::new(Error::Json {
            src: self.named_source(),
            span,
            source,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(dartgen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse library description")]
    #[diagnostic(code(dartgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse library description")]
    #[diagnostic(code(dartgen::json_error))]
    Json {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record at '{path}': {message}")]
    #[diagnostic(code(dartgen::invalid_record))]
    Record { path: String, message: String },

    #[error("cannot build '{path}'")]
    #[diagnostic(
        code(dartgen::lower_error),
        help("the record describes Dart that would not compile; see the cause below")
    )]
    Lower {
        path: String,
        #[source]
        source: dartgen_dart::Error,
    },
}

impl Error {
    /// Create a record error for the given location.
    pub fn record(path: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Record {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Wrap a node construction or lookup failure.
    pub fn lower(path: impl Into<String>, source: dartgen_dart::Error) -> Box<Self> {
        Box::new(Error::Lower {
            path: path.into(),
            source,
        })
    }

    /// The node error behind a lowering failure.
    pub fn node_error(&self) -> Option<&dartgen_dart::Error> {
        match self {
            Error::Lower { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_has_span() {
        let src = "{\n  \"declarations\": [,]\n}";
        let ctx = SourceContext::new(src, "lib.json");
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        match *ctx.json_error(err) {
            Error::Json { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_record_message() {
        let err = Error::record("declarations[0]", "unknown modifier 'foo'");
        assert_eq!(
            err.to_string(),
            "invalid record at 'declarations[0]': unknown modifier 'foo'"
        );
    }
}
