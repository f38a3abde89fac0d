//! Version catalog port
//!
//! Defines the read-only lookup interface conventions resolve coordinates
//! through.

use std::fmt;

use super::super::models::{
    CatalogEntry, CatalogKeyNotFound, Coordinate, EntryKind, PluginRef, VersionCatalog,
};

/// Read-only access to a version catalog
///
/// Implementations must be immutable once constructed so a single instance
/// can be shared across modules (and threads) without locking.
pub trait Catalog: Send + Sync + fmt::Debug {
    /// Look up an entry by namespace and alias
    ///
    /// A missing key is a hard failure, never a silent default.
    fn lookup(&self, kind: EntryKind, key: &str) -> Result<&CatalogEntry, CatalogKeyNotFound>;

    /// Look up a library coordinate
    fn library(&self, key: &str) -> Result<Coordinate, CatalogKeyNotFound> {
        match self.lookup(EntryKind::Library, key)? {
            CatalogEntry::Library(coordinate) => Ok(coordinate.clone()),
            other => Err(mismatch(other, EntryKind::Library, key)),
        }
    }

    /// Look up a plugin reference
    fn plugin(&self, key: &str) -> Result<PluginRef, CatalogKeyNotFound> {
        match self.lookup(EntryKind::Plugin, key)? {
            CatalogEntry::Plugin(plugin) => Ok(plugin.clone()),
            other => Err(mismatch(other, EntryKind::Plugin, key)),
        }
    }

    /// Look up a named version
    fn version(&self, key: &str) -> Result<String, CatalogKeyNotFound> {
        match self.lookup(EntryKind::Version, key)? {
            CatalogEntry::Version { value } => Ok(value.clone()),
            other => Err(mismatch(other, EntryKind::Version, key)),
        }
    }
}

// An implementation that files an entry under the wrong namespace has no
// entry of the requested kind for that key.
fn mismatch(found: &CatalogEntry, wanted: EntryKind, key: &str) -> CatalogKeyNotFound {
    log::debug!("catalog entry '{key}' is a {}, wanted {wanted}", found.kind());
    CatalogKeyNotFound {
        kind: wanted,
        key: key.to_string(),
    }
}

impl Catalog for VersionCatalog {
    fn lookup(&self, kind: EntryKind, key: &str) -> Result<&CatalogEntry, CatalogKeyNotFound> {
        self.entry(kind, key)
    }
}
