//! Core composition logic for buildlogic
//!
//! This module contains the pure composition logic with no I/O dependencies.
//! Catalog access is abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Module, DependencyEdge, VersionCatalog, ConventionId)
//! - `ports/` - Trait definitions (Catalog, Convention)
//! - `services/` - Built-in conventions, registry and composition engine
//! - `error` - The composition error taxonomy

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::ComposeError;
