//! Compose command - apply conventions and print module configurations

use std::sync::Arc;

use buildlogic::core::models::{ConventionId, ModuleRequest};
use buildlogic::core::services::{CompositionEngine, ConventionRegistry};
use buildlogic::output::{ComposeResult, ComposedModule, ModuleFailure, OutputMode};

use super::Sources;

/// Name given to an ad-hoc module when `--module` is not passed
const AD_HOC_MODULE: &str = "module";

/// Compose descriptor modules, or one ad-hoc module when conventions are
/// passed on the command line
pub fn compose(
    sources: &Sources,
    module: Option<&str>,
    conventions: &[String],
    mode: OutputMode,
) -> anyhow::Result<()> {
    let (requests, catalog) = if conventions.is_empty() {
        let loaded = sources.descriptor()?;
        let requests = match module {
            Some(name) => {
                let request = loaded
                    .module(name)
                    .ok_or_else(|| anyhow::anyhow!("module '{name}' is not declared in {}", loaded.path.display()))?;
                vec![request.clone()]
            },
            None => loaded.descriptor.modules.clone(),
        };
        let catalog = sources.catalog(Some(&loaded))?;
        (requests, catalog)
    } else {
        let request = ModuleRequest {
            name: module.unwrap_or(AD_HOC_MODULE).to_string(),
            conventions: conventions.iter().map(ConventionId::new).collect(),
        };
        (vec![request], sources.catalog(None)?)
    };

    if requests.is_empty() {
        log::warn!("no modules to compose");
    }

    let registry = ConventionRegistry::with_builtins(Arc::new(catalog));
    let engine = CompositionEngine::new(&registry);

    let mut result = ComposeResult {
        success: true,
        modules: Vec::new(),
        failures: Vec::new(),
    };
    for outcome in engine.compose_all(&requests) {
        match outcome.result {
            Ok(report) => result.modules.push(ComposedModule {
                report,
                configuration: outcome.module,
            }),
            Err(err) => {
                result.success = false;
                result.failures.push(ModuleFailure {
                    module: outcome.module.name().to_string(),
                    error: err.to_string(),
                });
            },
        }
    }

    result.render(mode);

    if !result.success {
        anyhow::bail!("{} module(s) failed to compose", result.failures.len());
    }
    Ok(())
}
