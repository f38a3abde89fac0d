//! Version catalog model
//!
//! A read-only table of named dependency coordinates, plugin ids and
//! versions. Conventions resolve every coordinate they declare through the
//! catalog so a build has a single source of truth for versions.
//!
//! Libraries, plugins and versions live in separate namespaces. Alias keys
//! are normalized the way Gradle normalizes them: `-`, `_` and `.` are
//! interchangeable separators.
//!
//! # Examples
//!
//! ```
//! use buildlogic::core::models::{Coordinate, EntryKind, VersionCatalog};
//! use buildlogic::core::ports::Catalog;
//!
//! let catalog = VersionCatalog::builder()
//!     .library("assertj", Coordinate::new("org.assertj", "assertj-core").with_version("3.25.3"))
//!     .version("jvm-target", "21")
//!     .build();
//!
//! let assertj = catalog.library("assertj").unwrap();
//! assert_eq!(assertj.to_string(), "org.assertj:assertj-core:3.25.3");
//!
//! let err = catalog.library("mockito-core").unwrap_err();
//! assert_eq!(err.kind, EntryKind::Library);
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `group:name[:version]` artifact coordinate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Artifact group (e.g. `org.junit.jupiter`)
    pub group: String,
    /// Artifact name (e.g. `junit-jupiter`)
    pub name: String,
    /// Version, absent for coordinates whose version comes from a platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Coordinate {
    /// Create a coordinate without a version
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: None,
        }
    }

    /// Attach a version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parse `group:name` or `group:name:version`
    ///
    /// Returns `None` when a segment is missing or empty.
    #[must_use]
    pub fn parse(notation: &str) -> Option<Self> {
        let mut parts = notation.trim().split(':');
        let group = parts.next().filter(|s| !s.is_empty())?;
        let name = parts.next().filter(|s| !s.is_empty())?;
        let version = match parts.next() {
            Some("") => return None,
            other => other,
        };
        if parts.next().is_some() {
            return None;
        }

        let coordinate = Self::new(group, name);
        Some(match version {
            Some(v) => coordinate.with_version(v),
            None => coordinate,
        })
    }

    /// `group:name` without the version
    #[must_use]
    pub fn module(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}:{}:{version}", self.group, self.name),
            None => write!(f, "{}:{}", self.group, self.name),
        }
    }
}

/// A build plugin reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRef {
    /// Plugin id (e.g. `org.springframework.boot`)
    pub id: String,
    /// Plugin version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Which catalog namespace an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// `[libraries]`
    Library,
    /// `[plugins]`
    Plugin,
    /// `[versions]`
    Version,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library => write!(f, "library"),
            Self::Plugin => write!(f, "plugin"),
            Self::Version => write!(f, "version"),
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "library" | "libraries" | "lib" => Ok(Self::Library),
            "plugin" | "plugins" => Ok(Self::Plugin),
            "version" | "versions" => Ok(Self::Version),
            _ => Err(format!("Invalid entry kind: {s}. Use: library, plugin, version")),
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogEntry {
    /// A dependency coordinate (versionless for platform-managed artifacts)
    Library(Coordinate),
    /// A plugin id and version
    Plugin(PluginRef),
    /// A named version
    Version {
        /// The version string
        value: String,
    },
}

impl CatalogEntry {
    /// The namespace this entry belongs to
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Library(_) => EntryKind::Library,
            Self::Plugin(_) => EntryKind::Plugin,
            Self::Version { .. } => EntryKind::Version,
        }
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library(coordinate) => write!(f, "{coordinate}"),
            Self::Plugin(PluginRef { id, version: Some(v) }) => write!(f, "{id} {v}"),
            Self::Plugin(PluginRef { id, version: None }) => write!(f, "{id}"),
            Self::Version { value } => write!(f, "{value}"),
        }
    }
}

/// A catalog lookup for a key that is not present
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("version catalog has no {kind} entry for '{key}'")]
pub struct CatalogKeyNotFound {
    /// Namespace that was searched
    pub kind: EntryKind,
    /// The key as requested
    pub key: String,
}

/// Normalize an alias so `spring-boot`, `spring_boot` and `spring.boot` match
#[must_use]
pub fn normalize_alias(alias: &str) -> String {
    alias
        .trim()
        .chars()
        .map(|c| match c {
            '_' | '.' => '-',
            other => other,
        })
        .collect()
}

/// An immutable version catalog
#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    entries: HashMap<(EntryKind, String), CatalogEntry>,
}

impl VersionCatalog {
    /// Start building a catalog
    #[must_use]
    pub fn builder() -> VersionCatalogBuilder {
        VersionCatalogBuilder::default()
    }

    /// Look up an entry in the given namespace
    pub fn entry(&self, kind: EntryKind, key: &str) -> Result<&CatalogEntry, CatalogKeyNotFound> {
        let normalized = normalize_alias(key);
        if normalized.is_empty() {
            return Err(CatalogKeyNotFound {
                kind,
                key: key.to_string(),
            });
        }
        self.entries.get(&(kind, normalized)).ok_or_else(|| CatalogKeyNotFound {
            kind,
            key: key.to_string(),
        })
    }

    /// Number of entries across all namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys in one namespace, sorted
    #[must_use]
    pub fn keys(&self, kind: EntryKind) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, key)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Builder for [`VersionCatalog`]
///
/// Later insertions under the same normalized alias replace earlier ones.
#[derive(Debug, Default)]
pub struct VersionCatalogBuilder {
    entries: HashMap<(EntryKind, String), CatalogEntry>,
}

impl VersionCatalogBuilder {
    /// Add a library
    #[must_use]
    pub fn library(mut self, alias: &str, coordinate: Coordinate) -> Self {
        self.insert(alias, CatalogEntry::Library(coordinate));
        self
    }

    /// Add a plugin
    #[must_use]
    pub fn plugin(mut self, alias: &str, id: &str, version: Option<&str>) -> Self {
        self.insert(
            alias,
            CatalogEntry::Plugin(PluginRef {
                id: id.to_string(),
                version: version.map(String::from),
            }),
        );
        self
    }

    /// Add a named version
    #[must_use]
    pub fn version(mut self, alias: &str, value: &str) -> Self {
        self.insert(
            alias,
            CatalogEntry::Version {
                value: value.to_string(),
            },
        );
        self
    }

    /// Remove an entry (handy for building incomplete catalogs)
    #[must_use]
    pub fn without(mut self, kind: EntryKind, alias: &str) -> Self {
        self.entries.remove(&(kind, normalize_alias(alias)));
        self
    }

    /// Add an arbitrary entry
    pub fn insert(&mut self, alias: &str, entry: CatalogEntry) {
        self.entries.insert((entry.kind(), normalize_alias(alias)), entry);
    }

    /// Add an entry unless its namespace already holds the normalized alias
    ///
    /// Returns `false`, leaving the existing entry in place, when
    /// `spring_boot` is added after `spring-boot` (or any other spelling
    /// that normalizes to the same key).
    #[must_use]
    pub fn insert_new(&mut self, alias: &str, entry: CatalogEntry) -> bool {
        match self.entries.entry((entry.kind(), normalize_alias(alias))) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            },
        }
    }

    /// Freeze into an immutable catalog
    #[must_use]
    pub fn build(self) -> VersionCatalog {
        VersionCatalog {
            entries: self.entries,
        }
    }
}
