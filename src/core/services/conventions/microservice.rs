//! Microservice stack, Spring Boot, shared dependencies
//!
//! Requires `language-conventions` and `unit-testing-conventions`; the engine
//! applies both before this profile runs.

use super::{library, platform};
use crate::core::models::{CatalogKeyNotFound, DependencyScope, Exclusion, Module};
use crate::core::ports::Catalog;

/// Catalog plugin for the web-application framework
pub const SPRING_BOOT_PLUGIN: &str = "spring-boot";

/// Catalog plugin for dependency management
pub const DEPENDENCY_MANAGEMENT_PLUGIN: &str = "spring-dep-management";

/// Web framework platform (BOM)
pub const SPRING_BOOT_BOM: &str = "spring-boot-bom";

/// Compile-scope starters, in declaration order
pub const STARTERS: [&str; 4] = [
    "spring-boot-starter",
    "spring-boot-starter-mvc",
    "spring-boot-starter-json",
    "spring-boot-starter-logging",
];

/// Framework test starter
pub const STARTER_TEST: &str = "spring-boot-starter-test";

/// Group of the legacy test-compatibility engine
///
/// Excluded from the test starter only; it would otherwise drag a second
/// test engine onto the test classpath.
pub const LEGACY_TEST_ENGINE_GROUP: &str = "org.junit.vintage";

pub(super) fn apply(module: &mut Module, catalog: &dyn Catalog) -> Result<(), CatalogKeyNotFound> {
    let plugins = [
        catalog.plugin(SPRING_BOOT_PLUGIN)?,
        catalog.plugin(DEPENDENCY_MANAGEMENT_PLUGIN)?,
    ];

    let mut edges = vec![platform(catalog, DependencyScope::Compile, SPRING_BOOT_BOM)?];
    for key in STARTERS {
        edges.push(library(catalog, DependencyScope::Compile, key)?);
    }
    edges.push(
        library(catalog, DependencyScope::TestCompile, STARTER_TEST)?
            .excluding(Exclusion::group(LEGACY_TEST_ENGINE_GROUP)),
    );

    for plugin in plugins {
        module.apply_plugin(plugin.id);
    }
    for edge in edges {
        module.add_dependency(edge);
    }
    Ok(())
}
