//! Composition services
//!
//! Pure orchestration logic: no I/O, only the catalog and modules passed in.
//!
//! - [`conventions`] - The built-in configuration profiles
//! - [`registry`] - Id to convention factory mapping
//! - [`engine`] - Planning and idempotent application

pub mod conventions;
pub mod engine;
pub mod registry;

pub use conventions::{BuiltinConvention, BuiltinKind};
pub use engine::{CompositionEngine, CompositionReport, ModuleOutcome, PlannedConvention};
pub use registry::{ConventionFactory, ConventionRegistry};
