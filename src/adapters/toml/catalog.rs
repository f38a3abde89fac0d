//! Version catalog loader
//!
//! Reads the Gradle `libs.versions.toml` layout into a [`VersionCatalog`]:
//!
//! ```toml
//! [versions]
//! junit = "5.10.2"
//!
//! [libraries]
//! junit-bom = { module = "org.junit:junit-bom", version.ref = "junit" }
//! junit-jupiter = { group = "org.junit.jupiter", name = "junit-jupiter" }
//! assertj = "org.assertj:assertj-core:3.25.3"
//!
//! [plugins]
//! spring-boot = { id = "org.springframework.boot", version.ref = "spring-boot" }
//! ```
//!
//! `version.ref` is resolved against `[versions]` at load time. `[bundles]`
//! is accepted and ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{CatalogEntry, Coordinate, EntryKind, PluginRef, VersionCatalog};

/// Errors from loading a catalog file
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The file could not be read
    #[error("failed to read catalog '{path}': {source}")]
    Read {
        /// Catalog path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the catalog layout
    #[error("failed to parse catalog {origin}: {message}")]
    Parse {
        /// Path or `<string>`
        origin: String,
        /// Parser message
        message: String,
    },

    /// A library notation is not `group:name[:version]`
    #[error("library '{alias}' has invalid coordinate '{value}' (expected group:name[:version])")]
    InvalidCoordinate {
        /// Library alias
        alias: String,
        /// Offending value
        value: String,
    },

    /// A library table names neither `module` nor `group` + `name`
    #[error("library '{alias}' must declare 'module' or both 'group' and 'name'")]
    IncompleteLibrary {
        /// Library alias
        alias: String,
    },

    /// A plugin notation is not `id[:version]`
    #[error("plugin '{alias}' has invalid notation '{value}' (expected id[:version])")]
    InvalidPlugin {
        /// Plugin alias
        alias: String,
        /// Offending value
        value: String,
    },

    /// A `version.ref` names a version that is not declared
    #[error("{kind} '{alias}' references undeclared version '{reference}'")]
    UnresolvedVersionRef {
        /// Namespace of the referencing entry
        kind: EntryKind,
        /// Referencing alias
        alias: String,
        /// Missing version alias
        reference: String,
    },

    /// A rich version declares none of `require`, `strictly`, `prefer`
    #[error("version '{alias}' declares no usable version")]
    EmptyVersion {
        /// Version alias
        alias: String,
    },

    /// Two aliases in one namespace differ only in `-`, `_` or `.`
    #[error("{kind} alias '{alias}' duplicates another alias ('-', '_' and '.' are equivalent)")]
    DuplicateAlias {
        /// Namespace of both entries
        kind: EntryKind,
        /// The alias that was rejected
        alias: String,
    },
}

/// Raw `libs.versions.toml` layout
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    versions: BTreeMap<String, VersionDecl>,
    #[serde(default)]
    libraries: BTreeMap<String, LibraryDecl>,
    #[serde(default)]
    plugins: BTreeMap<String, PluginDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionDecl {
    Plain(String),
    Rich(RichVersion),
}

#[derive(Debug, Deserialize)]
struct RichVersion {
    require: Option<String>,
    strictly: Option<String>,
    prefer: Option<String>,
}

impl RichVersion {
    fn preferred(self) -> Option<String> {
        self.require.or(self.strictly).or(self.prefer)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VersionSpec {
    Literal(String),
    Ref {
        #[serde(rename = "ref")]
        reference: String,
    },
    Rich(RichVersion),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LibraryDecl {
    Notation(String),
    Table {
        module: Option<String>,
        group: Option<String>,
        name: Option<String>,
        version: Option<VersionSpec>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PluginDecl {
    Notation(String),
    Table { id: String, version: Option<VersionSpec> },
}

/// Load a catalog from a file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid catalog, or
/// contains an entry that cannot be resolved.
pub fn load_catalog(path: &Path) -> Result<VersionCatalog, CatalogLoadError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content, &format!("'{}'", path.display()))?;
    log::debug!("loaded {} catalog entries from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Parse a catalog from TOML text
///
/// # Errors
///
/// Same as [`load_catalog`], minus I/O.
pub fn catalog_from_str(content: &str) -> Result<VersionCatalog, CatalogLoadError> {
    parse_catalog(content, "<string>")
}

fn parse_catalog(content: &str, origin: &str) -> Result<VersionCatalog, CatalogLoadError> {
    let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogLoadError::Parse {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    let mut versions = BTreeMap::new();
    for (alias, decl) in file.versions {
        let value = match decl {
            VersionDecl::Plain(value) => value,
            VersionDecl::Rich(rich) => rich
                .preferred()
                .ok_or_else(|| CatalogLoadError::EmptyVersion { alias: alias.clone() })?,
        };
        versions.insert(alias, value);
    }

    let mut entries = Vec::new();
    for (alias, decl) in file.libraries {
        let coordinate = resolve_library(&alias, decl, &versions)?;
        entries.push((alias, CatalogEntry::Library(coordinate)));
    }
    for (alias, decl) in file.plugins {
        let plugin = resolve_plugin(&alias, decl, &versions)?;
        entries.push((alias, CatalogEntry::Plugin(plugin)));
    }
    for (alias, value) in versions {
        entries.push((alias, CatalogEntry::Version { value }));
    }

    let mut builder = VersionCatalog::builder();
    for (alias, entry) in entries {
        let kind = entry.kind();
        if !builder.insert_new(&alias, entry) {
            return Err(CatalogLoadError::DuplicateAlias { kind, alias });
        }
    }

    Ok(builder.build())
}

fn resolve_version(
    kind: EntryKind,
    alias: &str,
    spec: VersionSpec,
    versions: &BTreeMap<String, String>,
) -> Result<String, CatalogLoadError> {
    match spec {
        VersionSpec::Literal(value) => Ok(value),
        VersionSpec::Ref { reference } => {
            versions
                .get(&reference)
                .cloned()
                .ok_or_else(|| CatalogLoadError::UnresolvedVersionRef {
                    kind,
                    alias: alias.to_string(),
                    reference,
                })
        },
        VersionSpec::Rich(rich) => rich.preferred().ok_or_else(|| CatalogLoadError::EmptyVersion {
            alias: alias.to_string(),
        }),
    }
}

fn resolve_library(
    alias: &str,
    decl: LibraryDecl,
    versions: &BTreeMap<String, String>,
) -> Result<Coordinate, CatalogLoadError> {
    let invalid = |value: &str| CatalogLoadError::InvalidCoordinate {
        alias: alias.to_string(),
        value: value.to_string(),
    };

    match decl {
        LibraryDecl::Notation(notation) => Coordinate::parse(&notation).ok_or_else(|| invalid(&notation)),
        LibraryDecl::Table {
            module,
            group,
            name,
            version,
        } => {
            let base = match (module, group, name) {
                (Some(module), _, _) => {
                    let coordinate = Coordinate::parse(&module).ok_or_else(|| invalid(&module))?;
                    // `module` carries no version; versions go in `version`
                    if coordinate.version.is_some() {
                        return Err(invalid(&module));
                    }
                    coordinate
                },
                (None, Some(group), Some(name)) => Coordinate::new(group, name),
                _ => {
                    return Err(CatalogLoadError::IncompleteLibrary {
                        alias: alias.to_string(),
                    });
                },
            };

            match version {
                Some(spec) => Ok(base.with_version(resolve_version(EntryKind::Library, alias, spec, versions)?)),
                None => Ok(base),
            }
        },
    }
}

fn resolve_plugin(
    alias: &str,
    decl: PluginDecl,
    versions: &BTreeMap<String, String>,
) -> Result<PluginRef, CatalogLoadError> {
    match decl {
        PluginDecl::Notation(notation) => {
            let (id, version) = match notation.split_once(':') {
                Some((id, version)) => (id.trim(), Some(version.trim())),
                None => (notation.trim(), None),
            };
            if id.is_empty() || version.is_some_and(str::is_empty) {
                return Err(CatalogLoadError::InvalidPlugin {
                    alias: alias.to_string(),
                    value: notation.clone(),
                });
            }
            Ok(PluginRef {
                id: id.to_string(),
                version: version.map(String::from),
            })
        },
        PluginDecl::Table { id, version } => {
            let version = version
                .map(|spec| resolve_version(EntryKind::Plugin, alias, spec, versions))
                .transpose()?;
            Ok(PluginRef { id, version })
        },
    }
}
