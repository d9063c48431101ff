//! Renderable trait and CodeFragment for decoupled rendering.
//!
//! Nodes describe their output as a list of fragments; the [`CodeBuilder`]
//! sink owns indentation and accumulates the final text.

use super::CodeBuilder;

/// Represents a fragment of rendered code.
///
/// CodeFragments form an intermediate representation between nodes
/// and the final string output, enabling composition and transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// Raw text without newline.
    Raw(String),
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A `///` doc comment, one line per line of text.
    Doc(String),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a blank line fragment.
    pub fn blank() -> Self {
        Self::Blank
    }

    /// Create a raw text fragment.
    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create a doc comment fragment.
    pub fn doc(s: impl Into<String>) -> Self {
        Self::Doc(s.into())
    }

    /// Split pre-formatted text into one line fragment per line.
    ///
    /// Blank lines inside the text are kept as [`CodeFragment::Blank`] so
    /// they do not pick up trailing indentation.
    pub fn lines(text: &str) -> Vec<CodeFragment> {
        text.lines()
            .map(|line| {
                if line.trim().is_empty() {
                    Self::Blank
                } else {
                    Self::Line(line.to_string())
                }
            })
            .collect()
    }
}

/// Trait for types that can be rendered into a [`CodeBuilder`] sink.
///
/// Every node writes its own trailing terminator (semicolon, closing brace),
/// so rendering a sequence is plain concatenation with no separators.
pub trait Renderable {
    /// Convert this node to a sequence of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;

    /// Render this node into the sink.
    fn render_into(&self, sink: &mut CodeBuilder) {
        for fragment in self.to_fragments() {
            sink.apply_fragment(fragment);
        }
    }

    /// Render this node on its own with the default indentation.
    fn render(&self) -> String {
        let mut sink = CodeBuilder::dart();
        self.render_into(&mut sink);
        sink.build()
    }
}

/// Blanket implementation for references.
impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

/// Slices render each element in order.
impl<T: Renderable> Renderable for [T] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.iter().flat_map(Renderable::to_fragments).collect()
    }
}

impl<T: Renderable> Renderable for Vec<T> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.as_slice().to_fragments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stmt(&'static str);

    impl Renderable for Stmt {
        fn to_fragments(&self) -> Vec<CodeFragment> {
            vec![CodeFragment::line(format!("{};", self.0))]
        }
    }

    #[test]
    fn test_code_fragment_constructors() {
        assert_eq!(
            CodeFragment::line("test"),
            CodeFragment::Line("test".to_string())
        );
        assert_eq!(CodeFragment::blank(), CodeFragment::Blank);
        assert_eq!(
            CodeFragment::raw("raw"),
            CodeFragment::Raw("raw".to_string())
        );
    }

    #[test]
    fn test_block_fragment() {
        let block = CodeFragment::block(
            "if (true) {",
            vec![CodeFragment::line("return 1;")],
            Some("}".to_string()),
        );
        match block {
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                assert_eq!(header, "if (true) {");
                assert_eq!(body.len(), 1);
                assert_eq!(close, Some("}".to_string()));
            }
            _ => panic!("Expected Block variant"),
        }
    }

    #[test]
    fn test_lines_keeps_blank_lines() {
        let fragments = CodeFragment::lines("a();\n\nb();");
        assert_eq!(
            fragments,
            vec![
                CodeFragment::line("a();"),
                CodeFragment::Blank,
                CodeFragment::line("b();"),
            ]
        );
    }

    #[test]
    fn test_sequence_renders_in_order_without_separators() {
        let nodes = vec![Stmt("a"), Stmt("b"), Stmt("c")];
        assert_eq!(nodes.render(), "a;\nb;\nc;\n");
    }

    #[test]
    fn test_concatenation_is_associative() {
        let mut whole = CodeBuilder::dart();
        vec![Stmt("a"), Stmt("b")].render_into(&mut whole);

        let mut split = CodeBuilder::dart();
        Stmt("a").render_into(&mut split);
        Stmt("b").render_into(&mut split);

        assert_eq!(whole.build(), split.build());
    }
}
