//! Deferred directives and the resolvers that turn them into concrete ones.
//!
//! A [`PendingDirective`] names assets rather than URIs. Calling
//! [`PendingDirective::resolve`] with a [`ResolveContext`] produces a
//! [`Directive`] that renders like any other.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::{
    ast::{Directive, Export, Import, Part, PartOf, UriReference, normalize},
    error::{LookupError, Result},
};

/// A file within a package, e.g. `my_app` + `lib/src/user.dart`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId {
    package: String,
    path: String,
}

impl AssetId {
    pub fn new(package: impl Into<String>, path: impl AsRef<str>) -> Self {
        let path = normalize(path.as_ref());
        Self {
            package: package.into(),
            path: path.trim_start_matches("./").trim_start_matches('/').to_string(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path below `lib/`, if the asset is public.
    pub fn lib_path(&self) -> Option<&str> {
        self.path.strip_prefix("lib/")
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.package, self.path)
    }
}

/// Computes the URI under which `asset` is referenced.
pub trait PathResolver {
    /// `from` is the referencing file, or `None` when referenced from
    /// outside any package.
    fn resolve(&self, asset: &AssetId, from: Option<&AssetId>) -> Result<UriReference>;
}

/// Reports the name a library declares, if any.
pub trait LibraryNameResolver {
    fn library_name(&self, asset: &AssetId) -> Result<Option<String>>;
}

/// Resolves assets with Dart package conventions.
///
/// Assets under `lib/` are public and reachable through `package:` URIs.
/// Files of the same package in the same area (`lib/` or not) reference each
/// other relatively. Non-`lib/` files are unreachable from other packages
/// and from `lib/`.
#[derive(Debug, Clone, Default)]
pub struct PackageResolver {
    assets: Option<IndexSet<AssetId>>,
}

impl PackageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict resolution to the given assets.
    pub fn with_assets(assets: impl IntoIterator<Item = AssetId>) -> Self {
        Self {
            assets: Some(assets.into_iter().collect()),
        }
    }
}

impl PathResolver for PackageResolver {
    fn resolve(&self, asset: &AssetId, from: Option<&AssetId>) -> Result<UriReference> {
        if let Some(assets) = &self.assets {
            if !assets.contains(asset) {
                tracing::debug!(%asset, "asset not found");
                return Err(LookupError::UnknownAsset(asset.to_string()).into());
            }
        }

        let unreachable = |from: String| LookupError::UnreachableAsset {
            asset: asset.to_string(),
            from,
        };

        let uri = match (asset.lib_path(), from) {
            (lib, Some(from)) if from.package() == asset.package() => {
                let from_lib = from.lib_path().is_some();
                match (lib, from_lib) {
                    (Some(_), true) | (None, false) => {
                        UriReference::relative(asset.path(), from.path())
                    }
                    (Some(path), false) => UriReference::package(asset.package(), path),
                    (None, true) => return Err(unreachable(from.to_string()).into()),
                }
            }
            (Some(path), _) => UriReference::package(asset.package(), path),
            (None, Some(from)) => return Err(unreachable(from.to_string()).into()),
            (None, None) => return Err(unreachable("outside the package".to_string()).into()),
        };
        tracing::trace!(%asset, %uri, "resolved asset");
        Ok(uri)
    }
}

/// Known library names, filled in by whoever analyzed the sources.
#[derive(Debug, Clone, Default)]
pub struct LibraryNames {
    names: IndexMap<AssetId, Option<String>>,
}

impl LibraryNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a library and its declared name (`None` for unnamed).
    pub fn insert(&mut self, asset: AssetId, name: Option<String>) {
        self.names.insert(asset, name);
    }

    pub fn with(mut self, asset: AssetId, name: Option<&str>) -> Self {
        self.insert(asset, name.map(str::to_string));
        self
    }
}

impl LibraryNameResolver for LibraryNames {
    fn library_name(&self, asset: &AssetId) -> Result<Option<String>> {
        self.names
            .get(asset)
            .cloned()
            .ok_or_else(|| LookupError::UnknownLibrary(asset.to_string()).into())
    }
}

/// Everything needed to resolve pending directives for one output file.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub paths: &'a dyn PathResolver,
    pub libraries: &'a dyn LibraryNameResolver,
    /// The file being generated.
    pub current: Option<&'a AssetId>,
}

impl ResolveContext<'_> {
    /// The `part of` directive pointing at `owner`.
    ///
    /// The owner's path is only resolved when it declares no library name.
    pub fn part_of(&self, owner: &AssetId) -> Result<PartOf> {
        match self.libraries.library_name(owner)? {
            Some(name) if !name.is_empty() => Ok(PartOf::Library(name)),
            _ => Ok(PartOf::Uri(self.paths.resolve(owner, self.current)?)),
        }
    }
}

/// A directive that still refers to an asset instead of a URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PendingDirective {
    Import {
        asset: AssetId,
        prefix: Option<String>,
        deferred: bool,
        show: Vec<String>,
        hide: Vec<String>,
    },
    Export {
        asset: AssetId,
        show: Vec<String>,
        hide: Vec<String>,
    },
    Part {
        asset: AssetId,
    },
    /// Resolves to `part of name;` when the owner declares a library name.
    PartOf {
        owner: AssetId,
    },
}

impl PendingDirective {
    pub fn import(asset: AssetId) -> Self {
        Self::Import {
            asset,
            prefix: None,
            deferred: false,
            show: Vec::new(),
            hide: Vec::new(),
        }
    }

    pub fn export(asset: AssetId) -> Self {
        Self::Export {
            asset,
            show: Vec::new(),
            hide: Vec::new(),
        }
    }

    pub fn part(asset: AssetId) -> Self {
        Self::Part { asset }
    }

    pub fn part_of(owner: AssetId) -> Self {
        Self::PartOf { owner }
    }

    /// Replace the asset with its URI.
    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<Directive> {
        let directive: Directive = match self {
            Self::Import {
                asset,
                prefix,
                deferred,
                show,
                hide,
            } => {
                let uri = ctx.paths.resolve(asset, ctx.current)?;
                let mut builder = Import::builder(uri);
                if let Some(prefix) = prefix {
                    builder = builder.prefix(prefix.clone());
                }
                if *deferred {
                    builder = builder.deferred();
                }
                for name in show {
                    builder = builder.show(name.clone());
                }
                for name in hide {
                    builder = builder.hide(name.clone());
                }
                builder.build()?.into()
            }
            Self::Export { asset, show, hide } => {
                let uri = ctx.paths.resolve(asset, ctx.current)?;
                let mut builder = Export::builder(uri);
                for name in show {
                    builder = builder.show(name.clone());
                }
                for name in hide {
                    builder = builder.hide(name.clone());
                }
                builder.build()?.into()
            }
            Self::Part { asset } => Part::new(ctx.paths.resolve(asset, ctx.current)?).into(),
            Self::PartOf { owner } => ctx.part_of(owner)?.into(),
        };
        tracing::debug!(directive = %directive.to_source(), "resolved directive");
        Ok(directive)
    }
}
