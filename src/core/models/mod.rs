//! Domain models for buildlogic
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Module`] - A build unit and its configuration
//! - [`DependencyEdge`] - "This module needs that artifact in this scope"
//! - [`VersionCatalog`] - Named coordinates, plugins and versions
//! - [`ConventionId`] - The stable name of a convention

mod catalog;
mod convention_id;
mod dependency;
mod module;

pub use catalog::{
    CatalogEntry, CatalogKeyNotFound, Coordinate, EntryKind, PluginRef, VersionCatalog,
    VersionCatalogBuilder, normalize_alias,
};
pub use convention_id::{ConventionId, ID_NAMESPACE};
pub use dependency::{DependencyEdge, DependencyScope, Exclusion, Notation};
pub use module::{
    CompilerOptions, Module, ModuleRequest, TaskEdge, TestEngine, TestEvent, TestTaskSettings, Toolchain,
};
