//! Integration testing (integrations, containers)

use super::{library, platform};
use crate::core::models::{CatalogKeyNotFound, DependencyScope, Module};
use crate::core::ports::Catalog;

/// Container-testing platform (BOM)
pub const TESTCONTAINERS_BOM: &str = "testcontainers-bom";

/// Container-testing JUnit integration
pub const TESTCONTAINERS_JUNIT: &str = "testcontainers-junit";

pub(super) fn apply(module: &mut Module, catalog: &dyn Catalog) -> Result<(), CatalogKeyNotFound> {
    let edges = [
        platform(catalog, DependencyScope::TestCompile, TESTCONTAINERS_BOM)?,
        library(catalog, DependencyScope::TestCompile, TESTCONTAINERS_JUNIT)?,
    ];

    for edge in edges {
        module.add_dependency(edge);
    }
    Ok(())
}
