//! Built-in conventions
//!
//! The closed set of configuration profiles shipped with buildlogic:
//!
//! | id                                | requires                     |
//! |-----------------------------------|------------------------------|
//! | `language-conventions`            |                              |
//! | `unit-testing-conventions`        |                              |
//! | `integration-testing-conventions` |                              |
//! | `event-driven-conventions`        |                              |
//! | `microservice-conventions`        | language, unit-testing       |
//!
//! Each profile performs all of its catalog lookups before it touches the
//! module, so a missing key leaves the module exactly as it found it.

pub mod event_driven;
pub mod integration_testing;
pub mod language;
pub mod microservice;
pub mod unit_testing;

use std::fmt;
use std::sync::Arc;

use crate::core::models::{CatalogKeyNotFound, ConventionId, DependencyEdge, DependencyScope, Module};
use crate::core::ports::{Catalog, Convention};

/// The built-in convention kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// Kotlin/JVM language and compiler settings
    Language,
    /// JUnit, AssertJ and Mockito test stack
    UnitTesting,
    /// Testcontainers integration-test stack
    IntegrationTesting,
    /// Axon event-sourcing/CQRS stack
    EventDriven,
    /// Spring Boot microservice stack
    Microservice,
}

impl BuiltinKind {
    /// All kinds, in registration order
    pub const ALL: [Self; 5] = [
        Self::Language,
        Self::UnitTesting,
        Self::IntegrationTesting,
        Self::EventDriven,
        Self::Microservice,
    ];

    /// The stable id string
    #[must_use]
    pub const fn id_str(self) -> &'static str {
        match self {
            Self::Language => "language-conventions",
            Self::UnitTesting => "unit-testing-conventions",
            Self::IntegrationTesting => "integration-testing-conventions",
            Self::EventDriven => "event-driven-conventions",
            Self::Microservice => "microservice-conventions",
        }
    }

    /// The stable id
    #[must_use]
    pub fn id(self) -> ConventionId {
        ConventionId::new(self.id_str())
    }

    /// Find the kind for an id
    #[must_use]
    pub fn from_id(id: &ConventionId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id_str() == id.as_str())
    }

    /// Kinds that must be applied first
    #[must_use]
    pub const fn requires(self) -> &'static [Self] {
        match self {
            Self::Microservice => &[Self::Language, Self::UnitTesting],
            _ => &[],
        }
    }

    /// One-line summary
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Language => "Basic language settings (Kotlin, compiler, JVM)",
            Self::UnitTesting => "Unit testing (JUnit, AssertJ, Mockito)",
            Self::IntegrationTesting => "Integration testing (integrations, containers)",
            Self::EventDriven => "Event-driven architecture (aggregates, CQRS, events)",
            Self::Microservice => "Microservice stack, Spring Boot, shared dependencies",
        }
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_str())
    }
}

/// A built-in convention bound to a catalog
#[derive(Debug, Clone)]
pub struct BuiltinConvention {
    kind: BuiltinKind,
    catalog: Arc<dyn Catalog>,
}

impl BuiltinConvention {
    /// Bind a built-in kind to the catalog it resolves coordinates from
    #[must_use]
    pub fn new(kind: BuiltinKind, catalog: Arc<dyn Catalog>) -> Self {
        Self { kind, catalog }
    }

    /// Which built-in this is
    #[must_use]
    pub const fn kind(&self) -> BuiltinKind {
        self.kind
    }
}

impl Convention for BuiltinConvention {
    fn id(&self) -> ConventionId {
        self.kind.id()
    }

    fn requires(&self) -> Vec<ConventionId> {
        self.kind.requires().iter().map(|kind| kind.id()).collect()
    }

    fn apply(&self, module: &mut Module) -> Result<(), CatalogKeyNotFound> {
        let catalog = self.catalog.as_ref();
        match self.kind {
            BuiltinKind::Language => language::apply(module, catalog),
            BuiltinKind::UnitTesting => unit_testing::apply(module, catalog),
            BuiltinKind::IntegrationTesting => integration_testing::apply(module, catalog),
            BuiltinKind::EventDriven => event_driven::apply(module, catalog),
            BuiltinKind::Microservice => microservice::apply(module, catalog),
        }
    }
}

/// Resolve a library key into a dependency edge
fn library(
    catalog: &dyn Catalog,
    scope: DependencyScope,
    key: &str,
) -> Result<DependencyEdge, CatalogKeyNotFound> {
    Ok(DependencyEdge::library(scope, catalog.library(key)?))
}

/// Resolve a library key into a platform (BOM) edge
fn platform(
    catalog: &dyn Catalog,
    scope: DependencyScope,
    key: &str,
) -> Result<DependencyEdge, CatalogKeyNotFound> {
    Ok(DependencyEdge::platform(scope, catalog.library(key)?))
}
