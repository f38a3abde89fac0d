//! Composition engine
//!
//! Applies conventions to a module in two phases:
//!
//! 1. **Plan** - resolve the requested ids, walk their required conventions
//!    depth-first and produce a dependencies-first order. Unknown ids and
//!    cycles are reported here, before anything is mutated.
//! 2. **Apply** - run each planned convention not yet recorded on the module.
//!    The whole plan runs against one staged copy that replaces the module
//!    only when every convention succeeded, so a failed composition leaves
//!    the module exactly as it was.
//!
//! Unrelated conventions keep request order (then requirement declaration
//! order), so the same request always yields the same module.

use std::collections::HashSet;

use serde::Serialize;

use crate::core::error::ComposeError;
use crate::core::models::{ConventionId, Module, ModuleRequest};
use crate::core::ports::Convention;

use super::registry::ConventionRegistry;

/// A convention scheduled for application
#[derive(Debug)]
pub struct PlannedConvention {
    /// The id it was resolved under
    pub id: ConventionId,
    /// The resolved convention
    pub convention: Box<dyn Convention>,
}

/// What a composition did to a module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompositionReport {
    /// Module name
    pub module: String,
    /// Conventions applied by this composition, in order
    pub applied: Vec<ConventionId>,
    /// Planned conventions that were already applied and skipped
    pub skipped: Vec<ConventionId>,
}

/// Outcome of composing one module of a multi-module build
#[derive(Debug)]
pub struct ModuleOutcome {
    /// The composed module, or the unconfigured one if composition failed
    pub module: Module,
    /// Report, or the error that aborted this module
    pub result: Result<CompositionReport, ComposeError>,
}

/// Applies conventions from a registry to modules
#[derive(Debug, Clone, Copy)]
pub struct CompositionEngine<'a> {
    registry: &'a ConventionRegistry,
}

#[derive(Default)]
struct PlanState {
    path: Vec<ConventionId>,
    planned: HashSet<ConventionId>,
    order: Vec<PlannedConvention>,
}

impl<'a> CompositionEngine<'a> {
    /// Create an engine over a registry
    #[must_use]
    pub const fn new(registry: &'a ConventionRegistry) -> Self {
        Self { registry }
    }

    /// Compute the application order for a request
    ///
    /// The result contains the transitive closure of required conventions,
    /// each once, with every convention after all of its requirements.
    ///
    /// # Errors
    ///
    /// [`ComposeError::UnknownConventionId`] for an unregistered requested or
    /// required id; [`ComposeError::ConventionCycleDetected`] for a cycle.
    pub fn plan<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<PlannedConvention>, ComposeError> {
        let mut state = PlanState::default();
        for raw in requested {
            let id = ConventionId::new(raw);
            self.visit(&id, &mut state)?;
        }

        log::debug!(
            "planned conventions: {}",
            state.order.iter().map(|p| p.id.as_str()).collect::<Vec<_>>().join(", ")
        );
        Ok(state.order)
    }

    /// Like [`plan`](Self::plan) but returns ids only
    ///
    /// # Errors
    ///
    /// Same as [`plan`](Self::plan).
    pub fn plan_ids<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<ConventionId>, ComposeError> {
        Ok(self.plan(requested)?.into_iter().map(|p| p.id).collect())
    }

    fn visit(&self, id: &ConventionId, state: &mut PlanState) -> Result<(), ComposeError> {
        if state.planned.contains(id) {
            return Ok(());
        }

        if let Some(start) = state.path.iter().position(|p| p == id) {
            let mut cycle = state.path[start..].to_vec();
            cycle.push(id.clone());
            return Err(ComposeError::ConventionCycleDetected { cycle });
        }

        let convention = self.registry.resolve(id)?;

        state.path.push(id.clone());
        for required in convention.requires() {
            self.visit(&required, state)?;
        }
        state.path.pop();

        state.planned.insert(id.clone());
        state.order.push(PlannedConvention {
            id: id.clone(),
            convention,
        });
        Ok(())
    }

    /// Apply the requested conventions (and their requirements) to a module
    ///
    /// Conventions already recorded on the module are skipped, so composing
    /// the same request twice is a no-op the second time.
    ///
    /// # Errors
    ///
    /// Planning errors leave the module untouched. A convention whose catalog
    /// lookup fails raises [`ComposeError::CatalogKeyNotFound`] and the module
    /// keeps none of this call's changes, including those of conventions
    /// applied before the failing one.
    pub fn compose<S: AsRef<str>>(
        &self,
        module: &mut Module,
        requested: &[S],
    ) -> Result<CompositionReport, ComposeError> {
        let plan = self.plan(requested)?;
        let mut report = CompositionReport {
            module: module.name().to_string(),
            ..CompositionReport::default()
        };

        let mut staged = module.clone();
        for PlannedConvention { id, convention } in plan {
            if staged.has_applied(&id) {
                log::debug!("[{}] '{id}' already applied, skipping", staged.name());
                report.skipped.push(id);
                continue;
            }

            convention
                .apply(&mut staged)
                .map_err(|source| ComposeError::CatalogKeyNotFound {
                    convention: id.clone(),
                    source,
                })?;
            staged.mark_applied(id.clone());

            log::debug!("[{}] applied '{id}'", staged.name());
            report.applied.push(id);
        }
        *module = staged;

        log::info!(
            "composed module '{}' ({} applied, {} skipped)",
            report.module,
            report.applied.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Compose every module of a build, each from a fresh [`Module`]
    ///
    /// Modules are independent: a failure in one does not stop the others.
    #[must_use]
    pub fn compose_all(&self, requests: &[ModuleRequest]) -> Vec<ModuleOutcome> {
        requests
            .iter()
            .map(|request| {
                let mut module = Module::new(&request.name);
                let result = self.compose(&mut module, &request.conventions);
                if let Err(err) = &result {
                    log::warn!("module '{}' failed to compose: {err}", request.name);
                }
                ModuleOutcome { module, result }
            })
            .collect()
    }
}
