//! Unit testing (JUnit, AssertJ, Mockito)

use super::{library, platform};
use crate::core::models::{CatalogKeyNotFound, DependencyScope, Module, TestEngine, TestEvent};
use crate::core::ports::Catalog;

/// Companion capability that exposes test fixtures to other modules
pub const TEST_FIXTURES_PLUGIN: &str = "java-test-fixtures";

/// Test framework platform (BOM)
pub const JUNIT_BOM: &str = "junit-bom";

/// Test-compile libraries, in declaration order
pub const TEST_LIBRARIES: [&str; 5] = [
    "junit-jupiter",
    "junit-jupiter-params",
    "assertj",
    "mockito-core",
    "mockito-kotlin",
];

/// Test-runtime launcher
pub const JUNIT_PLATFORM_LAUNCHER: &str = "junit-platform-launcher";

/// Events the test task reports in the build log
pub const LOGGED_EVENTS: [TestEvent; 3] = [TestEvent::Passed, TestEvent::Skipped, TestEvent::Failed];

pub(super) fn apply(module: &mut Module, catalog: &dyn Catalog) -> Result<(), CatalogKeyNotFound> {
    let mut edges = vec![platform(catalog, DependencyScope::TestCompile, JUNIT_BOM)?];
    for key in TEST_LIBRARIES {
        edges.push(library(catalog, DependencyScope::TestCompile, key)?);
    }
    edges.push(library(catalog, DependencyScope::TestRuntime, JUNIT_PLATFORM_LAUNCHER)?);

    module.apply_plugin(TEST_FIXTURES_PLUGIN);
    for edge in edges {
        module.add_dependency(edge);
    }

    let test_task = module.test_task_mut();
    test_task.engine = Some(TestEngine::JunitPlatform);
    for event in LOGGED_EVENTS {
        if !test_task.logged_events.contains(&event) {
            test_task.logged_events.push(event);
        }
    }

    Ok(())
}
