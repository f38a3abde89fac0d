//! TOML adapters
//!
//! - [`catalog`] - `libs.versions.toml` version catalog loader

pub mod catalog;

pub use catalog::{CatalogLoadError, catalog_from_str, load_catalog};
