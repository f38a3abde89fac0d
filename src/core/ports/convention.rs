//! Convention port
//!
//! A convention is a named, idempotent unit of build configuration.

use std::fmt;

use super::super::models::{CatalogKeyNotFound, ConventionId, Module};

/// A named configuration profile applied to a module
///
/// Conventions are constructed with everything they read (typically the
/// shared catalog) and hold no per-module state: applying the same value to
/// two modules must not leak anything between them.
pub trait Convention: Send + Sync + fmt::Debug {
    /// Stable identifier
    fn id(&self) -> ConventionId;

    /// Conventions that must be applied to the module before this one
    fn requires(&self) -> Vec<ConventionId> {
        Vec::new()
    }

    /// Mutate the module's configuration
    ///
    /// The composition engine calls this at most once per module, after
    /// every required convention has been applied.
    fn apply(&self, module: &mut Module) -> Result<(), CatalogKeyNotFound>;
}
