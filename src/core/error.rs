//! Composition errors
//!
//! Every variant is a static misconfiguration of the build. None is retried;
//! each one aborts configuration of the module it was raised for.

use thiserror::Error;

use super::models::{CatalogKeyNotFound, ConventionId};

/// Errors raised while registering, planning or applying conventions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A requested or required id is not registered
    #[error("unknown convention id '{0}'")]
    UnknownConventionId(String),

    /// An id was registered twice
    #[error("convention '{0}' is already registered")]
    DuplicateConventionId(ConventionId),

    /// The required-convention graph has a cycle
    #[error("convention cycle detected: {}", format_cycle(.cycle))]
    ConventionCycleDetected {
        /// The cycle, starting and ending at the same id
        cycle: Vec<ConventionId>,
    },

    /// A convention could not resolve a catalog key
    #[error("convention '{convention}' failed: {source}")]
    CatalogKeyNotFound {
        /// The convention being applied
        convention: ConventionId,
        /// The failed lookup
        #[source]
        source: CatalogKeyNotFound,
    },
}

fn format_cycle(cycle: &[ConventionId]) -> String {
    cycle.iter().map(ConventionId::as_str).collect::<Vec<_>>().join(" -> ")
}
