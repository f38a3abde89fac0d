//! Conventions command - list registered conventions

use std::sync::Arc;

use buildlogic::core::models::VersionCatalog;
use buildlogic::core::services::{BuiltinKind, ConventionRegistry};
use buildlogic::output::{ConventionInfo, ConventionListResult, OutputMode};

/// List the registered conventions and what they require
///
/// Listing resolves no coordinates, so no catalog is needed.
pub fn conventions(mode: OutputMode) -> anyhow::Result<()> {
    let registry = ConventionRegistry::with_builtins(Arc::new(VersionCatalog::default()));

    let mut listed = Vec::with_capacity(registry.ids().len());
    for id in registry.ids() {
        let convention = registry.resolve(id)?;
        listed.push(ConventionInfo {
            id: id.to_string(),
            qualified_id: id.qualified(),
            requires: convention.requires().iter().map(ToString::to_string).collect(),
            description: BuiltinKind::from_id(id).map(|kind| kind.description().to_string()),
        });
    }

    ConventionListResult { conventions: listed }.render(mode);
    Ok(())
}
