//! Formatter contract for rendered source.
//!
//! A formatter is applied once to a fully rendered file. Implementations must
//! be idempotent; the renderer never depends on their layout rules.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use eyre::{Result, WrapErr, eyre};

/// A pure `text -> text` post-processing step.
pub trait Formatter {
    /// Format a complete source file.
    fn format(&self, source: &str) -> Result<String>;
}

/// Formatter that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Formatter for Passthrough {
    fn format(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Formatter backed by the `dart format` command, fed through stdin.
#[derive(Debug, Clone)]
pub struct DartFormat {
    program: String,
    line_length: Option<u16>,
}

impl DartFormat {
    /// Use the `dart` executable found on `PATH`.
    pub fn new() -> Self {
        Self {
            program: "dart".to_string(),
            line_length: None,
        }
    }

    /// Use a specific `dart` executable.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Override the page width passed to the formatter.
    pub fn line_length(mut self, width: u16) -> Self {
        self.line_length = Some(width);
        self
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec!["format".to_string(), "--output=show".to_string()];
        if let Some(width) = self.line_length {
            args.push(format!("--line-length={}", width));
        }
        args
    }
}

impl Default for DartFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for DartFormat {
    fn format(&self, source: &str) -> Result<String> {
        tracing::debug!(program = %self.program, bytes = source.len(), "running dart format");

        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .wrap_err_with(|| format!("failed to run {} format", self.program))?;

        child
            .stdin
            .take()
            .ok_or_else(|| eyre!("formatter stdin unavailable"))?
            .write_all(source.as_bytes())
            .wrap_err("failed to write source to formatter")?;

        let output = child
            .wait_with_output()
            .wrap_err("failed to wait for formatter")?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(eyre!(
                "dart format failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_is_identity() {
        let src = "class A {}\n";
        assert_eq!(Passthrough.format(src).unwrap(), src);
    }

    #[test]
    fn test_dart_format_args() {
        let fmt = DartFormat::new().line_length(100);
        assert_eq!(fmt.args(), ["format", "--output=show", "--line-length=100"]);
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let fmt = DartFormat::new().program("dartgen-definitely-not-installed");
        assert!(fmt.format("void main() {}").is_err());
    }
}
