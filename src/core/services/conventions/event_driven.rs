//! Event-driven architecture (aggregates, CQRS, events)

use super::{library, platform};
use crate::core::models::{CatalogKeyNotFound, DependencyScope, Module};
use crate::core::ports::Catalog;

/// Event-sourcing framework platform (BOM)
pub const AXON_BOM: &str = "axon-bom";

/// Event-sourcing framework starter
pub const AXON_STARTER: &str = "axon-spring-boot-starter";

pub(super) fn apply(module: &mut Module, catalog: &dyn Catalog) -> Result<(), CatalogKeyNotFound> {
    let edges = [
        platform(catalog, DependencyScope::Compile, AXON_BOM)?,
        library(catalog, DependencyScope::Compile, AXON_STARTER)?,
    ];

    for edge in edges {
        module.add_dependency(edge);
    }
    Ok(())
}
