//! Lookup command - query the version catalog

use buildlogic::core::models::EntryKind;
use buildlogic::core::ports::Catalog;
use buildlogic::output::{LookupResult, OutputMode};

use super::Sources;

/// Look up one catalog entry by namespace and alias
pub fn lookup(sources: &Sources, kind: EntryKind, key: &str, mode: OutputMode) -> anyhow::Result<()> {
    let catalog = sources.catalog(None)?;
    let entry = catalog.lookup(kind, key)?.clone();

    LookupResult {
        kind,
        key: key.to_string(),
        entry,
    }
    .render(mode);
    Ok(())
}
