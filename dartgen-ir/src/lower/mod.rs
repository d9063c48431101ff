//! Lowering: validate records into `dartgen-dart` nodes.
//!
//! Every failure carries the dotted location of the offending record, e.g.
//! `declarations[0].members[2].params[1]`.

mod nodes;

use std::fmt;

use dartgen_codegen::Indent;
use dartgen_dart::{
    AssetId, ConverterRegistry, DartFile, LibraryNameResolver, LibraryNames, PackageResolver,
    PathResolver, RenderOptions, ResolveContext,
    ast::{Directive, Export, Import, Part, PartOf, UriReference},
};

use crate::{
    Error, Result,
    library::{
        AssetRecord, DirectiveRecord, Library, Modifier, OutputRecord, PartOfRecord,
        TargetRecord,
    },
};

/// Collaborators used while lowering.
#[derive(Clone, Copy)]
pub struct LowerContext<'a> {
    /// Converters for custom constant values.
    pub registry: &'a ConverterRegistry,
    pub paths: &'a dyn PathResolver,
    pub libraries: &'a dyn LibraryNameResolver,
}

impl<'a> LowerContext<'a> {
    pub fn new(
        registry: &'a ConverterRegistry,
        paths: &'a dyn PathResolver,
        libraries: &'a dyn LibraryNameResolver,
    ) -> Self {
        Self {
            registry,
            paths,
            libraries,
        }
    }
}

/// Dotted location of a record within a library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RecordPath(String);

impl RecordPath {
    pub(crate) fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    pub(crate) fn index(&self, name: &str, index: usize) -> Self {
        let mut path = self.field(name);
        path.0.push_str(&format!("[{}]", index));
        path
    }

    /// Wrap a node error.
    pub(crate) fn lower(&self, source: dartgen_dart::Error) -> Box<Error> {
        Error::lower(self.0.clone(), source)
    }

    /// A record error at this location.
    pub(crate) fn record(&self, message: impl Into<String>) -> Box<Error> {
        Error::record(self.0.clone(), message)
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Modifiers of one record, checked against the keywords it accepts.
pub(crate) struct Flags(Vec<Modifier>);

impl Flags {
    pub(crate) fn check(
        path: &RecordPath,
        modifiers: &[Modifier],
        allowed: &[Modifier],
        what: &str,
    ) -> Result<Self> {
        let mut seen = Vec::with_capacity(modifiers.len());
        for modifier in modifiers {
            if !allowed.contains(modifier) {
                return Err(path.record(format!(
                    "modifier '{}' is not accepted on {}",
                    modifier.as_str(),
                    what
                )));
            }
            if seen.contains(modifier) {
                return Err(path.record(format!("modifier '{}' is repeated", modifier.as_str())));
            }
            seen.push(*modifier);
        }
        Ok(Self(seen))
    }

    pub(crate) fn has(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }
}

impl Library {
    /// Lower with no custom converters and package-convention resolution.
    pub fn lower(&self) -> Result<DartFile> {
        let registry = ConverterRegistry::new();
        let paths = PackageResolver::new();
        let libraries = LibraryNames::new();
        self.lower_with(&LowerContext::new(&registry, &paths, &libraries))
    }

    /// Lower into a [`DartFile`], failing on the first invalid record.
    pub fn lower_with(&self, ctx: &LowerContext<'_>) -> Result<DartFile> {
        let root = RecordPath::default();
        let current = self.output.asset.as_ref().map(asset_id);
        let resolve = ResolveContext {
            paths: ctx.paths,
            libraries: ctx.libraries,
            current: current.as_ref(),
        };

        let options = render_options(&self.output, &resolve, &root.field("output"))?;
        let mut file = DartFile::with_options(options);

        for (i, record) in self.directives.iter().enumerate() {
            let path = root.index("directives", i);
            file = file.directive(directive(record, &resolve, &path)?);
        }
        for (i, record) in self.declarations.iter().enumerate() {
            let path = root.index("declarations", i);
            let declaration = nodes::declaration(record, ctx, &path)?;
            tracing::trace!(path = %path, name = ?declaration.name(), "lowered declaration");
            file = file.declaration(declaration);
        }

        tracing::debug!(
            directives = self.directives.len(),
            declarations = self.declarations.len(),
            "lowered library"
        );
        Ok(file)
    }
}

fn asset_id(record: &AssetRecord) -> AssetId {
    AssetId::new(record.package.clone(), &record.path)
}

fn render_options(
    output: &OutputRecord,
    resolve: &ResolveContext<'_>,
    path: &RecordPath,
) -> Result<RenderOptions> {
    let mut options = RenderOptions::new();
    options.indent = output.indent.map_or(Indent::DART, Indent::from_width);
    if let Some(generator) = &output.generator {
        options = options.generator(generator.clone());
    }
    if let Some(part_of) = &output.part_of {
        let path = path.field("part_of");
        options = options.part_of(match part_of {
            PartOfRecord::Library(name) => {
                if name.is_empty() {
                    return Err(path.record("library name is empty"));
                }
                PartOf::Library(name.clone())
            }
            PartOfRecord::Uri(uri) => PartOf::Uri(UriReference::parse(uri)),
            PartOfRecord::Asset(owner) => resolve
                .part_of(&asset_id(owner))
                .map_err(|e| path.lower(e))?,
        });
    }
    Ok(options)
}

fn directive(
    record: &DirectiveRecord,
    resolve: &ResolveContext<'_>,
    path: &RecordPath,
) -> Result<Directive> {
    let result = match record {
        DirectiveRecord::Import {
            target,
            prefix,
            modifiers,
            show,
            hide,
        } => {
            let flags = Flags::check(path, modifiers, &[Modifier::Deferred], "an import")?;
            target_uri(target, resolve).and_then(|uri| {
                let mut builder = Import::builder(uri);
                if let Some(prefix) = prefix {
                    builder = builder.prefix(prefix.clone());
                }
                if flags.has(Modifier::Deferred) {
                    builder = builder.deferred();
                }
                for name in show {
                    builder = builder.show(name.clone());
                }
                for name in hide {
                    builder = builder.hide(name.clone());
                }
                builder.build().map(Directive::from)
            })
        }
        DirectiveRecord::Export { target, show, hide } => {
            target_uri(target, resolve).and_then(|uri| {
                let mut builder = Export::builder(uri);
                for name in show {
                    builder = builder.show(name.clone());
                }
                for name in hide {
                    builder = builder.hide(name.clone());
                }
                builder.build().map(Directive::from)
            })
        }
        DirectiveRecord::Part { target } => {
            target_uri(target, resolve).map(|uri| Part::new(uri).into())
        }
    };
    result.map_err(|e| path.lower(e))
}

fn target_uri(
    target: &TargetRecord,
    resolve: &ResolveContext<'_>,
) -> dartgen_dart::Result<UriReference> {
    match target {
        TargetRecord::Uri(uri) => Ok(UriReference::parse(uri)),
        TargetRecord::Asset(asset) => resolve.paths.resolve(&asset_id(asset), resolve.current),
    }
}
