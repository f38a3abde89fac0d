//! Plan command - show application order without applying anything

use std::sync::Arc;

use buildlogic::core::models::VersionCatalog;
use buildlogic::core::services::{CompositionEngine, ConventionRegistry};
use buildlogic::output::{OutputMode, PlanResult};

/// Print the order the requested conventions would be applied in
pub fn plan(requested: &[String], mode: OutputMode) -> anyhow::Result<()> {
    // Planning never looks up catalog keys
    let registry = ConventionRegistry::with_builtins(Arc::new(VersionCatalog::default()));
    let engine = CompositionEngine::new(&registry);

    let order = engine.plan_ids(requested)?;

    PlanResult {
        requested: requested.to_vec(),
        order: order.iter().map(ToString::to_string).collect(),
    }
    .render(mode);
    Ok(())
}
