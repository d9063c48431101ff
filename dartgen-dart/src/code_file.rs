//! Whole-file rendering.
//!
//! A [`DartFile`] lays out a generated Dart library: the generated-code
//! banner, the owning `part of` directive for part files, the remaining
//! directives, then the declarations separated by blank lines.

use std::path::{Path, PathBuf};

use dartgen_codegen::{CodeBuilder, Formatter, Indent};
use dartgen_core::{FileRules, GENERATED_NOTICE, GeneratedFile, Overwrite, banner};
use indexmap::IndexSet;

use crate::ast::{Declaration, Directive, PartOf};

/// Options applied when rendering a [`DartFile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub indent: Indent,
    /// Generator named in the header banner; no banner when `None`.
    pub generator: Option<String>,
    /// Library this file is a part of.
    pub part_of: Option<PartOf>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn generator(mut self, name: impl Into<String>) -> Self {
        self.generator = Some(name.into());
        self
    }

    pub fn part_of(mut self, part_of: PartOf) -> Self {
        self.part_of = Some(part_of);
        self
    }
}

/// The contents of one generated Dart file.
///
/// Directives keep their insertion order; adding an identical directive
/// twice keeps the first.
#[derive(Debug, Clone, Default)]
pub struct DartFile {
    options: RenderOptions,
    directives: IndexSet<Directive>,
    declarations: Vec<Declaration>,
}

impl DartFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn directive(mut self, directive: impl Into<Directive>) -> Self {
        self.directives.insert(directive.into());
        self
    }

    pub fn directives<I, D>(mut self, directives: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Directive>,
    {
        self.directives
            .extend(directives.into_iter().map(Into::into));
        self
    }

    pub fn declaration(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    pub fn declarations<I, D>(mut self, declarations: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Declaration>,
    {
        self.declarations
            .extend(declarations.into_iter().map(Into::into));
        self
    }

    pub fn directive_list(&self) -> impl Iterator<Item = &Directive> {
        self.directives.iter()
    }

    pub fn declaration_list(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.declarations.is_empty()
    }

    /// Render the file.
    pub fn render(&self) -> String {
        tracing::debug!(
            directives = self.directives.len(),
            declarations = self.declarations.len(),
            "rendering dart file"
        );
        let mut builder = CodeBuilder::new(self.options.indent);

        if let Some(generator) = &self.options.generator {
            builder.push_line(GENERATED_NOTICE);
            builder.push_blank();
            builder.push_raw(&banner(generator));
            builder.push_blank();
        }

        if let Some(part_of) = &self.options.part_of {
            builder.emit(&Directive::PartOf(part_of.clone()));
            if !self.directives.is_empty() || !self.declarations.is_empty() {
                builder.push_blank();
            }
        }

        for directive in &self.directives {
            builder.emit(directive);
        }
        if !self.directives.is_empty() && !self.declarations.is_empty() {
            builder.push_blank();
        }

        for (i, declaration) in self.declarations.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            builder.emit(declaration);
        }

        let text = builder.build();
        tracing::trace!(bytes = text.len(), "rendered dart file");
        text
    }

    /// Render the file and pass it through `formatter` once.
    pub fn render_formatted(&self, formatter: &dyn Formatter) -> eyre::Result<String> {
        formatter.format(&self.render())
    }

    /// Pair the file with its output location.
    pub fn into_output(self, path: impl Into<PathBuf>) -> DartOutput {
        DartOutput {
            path: path.into(),
            file: self,
            formatter: None,
            rules: FileRules::default(),
        }
    }
}

/// A [`DartFile`] bound to a path, ready to be written.
pub struct DartOutput {
    path: PathBuf,
    file: DartFile,
    formatter: Option<Box<dyn Formatter>>,
    rules: FileRules,
}

impl DartOutput {
    /// Format the content before writing.
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Leave an existing file untouched.
    pub fn if_missing(mut self) -> Self {
        self.rules.overwrite = Overwrite::IfMissing;
        self
    }

    pub fn file(&self) -> &DartFile {
        &self.file
    }
}

impl GeneratedFile for DartOutput {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    fn rules(&self) -> FileRules {
        self.rules
    }

    fn render(&self) -> eyre::Result<String> {
        match &self.formatter {
            Some(formatter) => self.file.render_formatted(formatter.as_ref()),
            None => Ok(self.file.render()),
        }
    }
}
