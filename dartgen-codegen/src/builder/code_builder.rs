//! Text sink that tracks indentation while nodes render into it.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates rendered source with proper indentation.
///
/// # Example
///
/// ```
/// use dartgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::dart();
/// builder
///     .push_line("void main() {")
///     .push_indent()
///     .push_line("print('hello');")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "void main() {\n  print('hello');\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    unit: String,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            unit: indent.unit(),
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn dart() -> Self {
        Self::new(Indent::DART)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a `///` doc comment, one comment line per line of text.
    pub fn push_doc(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.write_indent();
            if line.is_empty() {
                self.buffer.push_str("///\n");
            } else {
                self.buffer.push_str("/// ");
                self.buffer.push_str(line);
                self.buffer.push('\n');
            }
        }
        self
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        node.render_into(self);
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Raw(s) => {
                self.push_raw(&s);
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Doc(text) => {
                self.push_doc(&text);
            }
        }
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Check whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the builder and return the accumulated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.unit);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::dart()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut b = CodeBuilder::dart();
        b.push_line("final x = 1;");
        assert_eq!(b.build(), "final x = 1;\n");
    }

    #[test]
    fn test_block_fragment_indents_body() {
        let mut b = CodeBuilder::dart();
        b.apply_fragment(CodeFragment::block(
            "class Foo {",
            vec![CodeFragment::line("int x = 0;")],
            Some("}".to_string()),
        ));
        assert_eq!(b.build(), "class Foo {\n  int x = 0;\n}\n");
    }

    #[test]
    fn test_nested_blocks_with_tabs() {
        let mut b = CodeBuilder::new(Indent::Tab);
        b.apply_fragment(CodeFragment::block(
            "a {",
            vec![CodeFragment::block(
                "b {",
                vec![CodeFragment::line("c;")],
                Some("}".to_string()),
            )],
            Some("}".to_string()),
        ));
        assert_eq!(b.build(), "a {\n\tb {\n\t\tc;\n\t}\n}\n");
    }

    #[test]
    fn test_odd_space_width() {
        let mut b = CodeBuilder::new(Indent::Spaces(3));
        b.apply_fragment(CodeFragment::block(
            "a {",
            vec![CodeFragment::block(
                "b {",
                vec![CodeFragment::line("c;")],
                Some("}".to_string()),
            )],
            Some("}".to_string()),
        ));
        assert_eq!(b.build(), "a {\n   b {\n      c;\n   }\n}\n");
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut b = CodeBuilder::dart();
        b.push_indent().push_line("a;").push_blank().push_line("b;");
        assert_eq!(b.build(), "  a;\n\n  b;\n");
    }

    #[test]
    fn test_doc_comment_multiline() {
        let mut b = CodeBuilder::dart();
        b.push_doc("First line.\n\nSecond line.");
        assert_eq!(b.build(), "/// First line.\n///\n/// Second line.\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut b = CodeBuilder::dart();
        b.push_dedent().push_line("x;");
        assert_eq!(b.current_indent(), 0);
        assert_eq!(b.as_str(), "x;\n");
    }
}
