//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{CatalogEntry, ConventionId, EntryKind, Module};
use crate::core::services::CompositionReport;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A registered convention
#[derive(Debug, Serialize)]
pub struct ConventionInfo {
    /// Bare id (e.g. `microservice-conventions`)
    pub id: String,
    /// Plugin-style id (e.g. `buildlogic.microservice-conventions`)
    pub qualified_id: String,
    /// Ids that are applied first
    pub requires: Vec<String>,
    /// Summary, for built-ins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Result of listing conventions
#[derive(Debug, Serialize)]
pub struct ConventionListResult {
    /// Registered conventions in registration order
    pub conventions: Vec<ConventionInfo>,
}

/// Result of planning a request
#[derive(Debug, Serialize)]
pub struct PlanResult {
    /// Ids as requested
    pub requested: Vec<String>,
    /// Application order
    pub order: Vec<String>,
}

/// One successfully composed module
#[derive(Debug, Serialize)]
pub struct ComposedModule {
    /// What was applied
    pub report: CompositionReport,
    /// The resulting configuration
    pub configuration: Module,
}

/// One module that failed to compose
#[derive(Debug, Serialize)]
pub struct ModuleFailure {
    /// Module name
    pub module: String,
    /// Error message
    pub error: String,
}

/// Result of composing descriptor modules
#[derive(Debug, Serialize)]
pub struct ComposeResult {
    /// Whether every module composed
    pub success: bool,
    /// Composed modules
    pub modules: Vec<ComposedModule>,
    /// Failed modules
    pub failures: Vec<ModuleFailure>,
}

/// Result of a catalog lookup
#[derive(Debug, Serialize)]
pub struct LookupResult {
    /// Namespace searched
    pub kind: EntryKind,
    /// Key as requested
    pub key: String,
    /// The entry found
    pub entry: CatalogEntry,
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

impl ConventionListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        if self.conventions.is_empty() {
            println!("No conventions registered.");
            return;
        }

        println!("Conventions:\n");
        for c in &self.conventions {
            println!("  {}", c.id.bold());
            if let Some(description) = &c.description {
                println!("    {description}");
            }
            if !c.requires.is_empty() {
                println!("    requires: {}", c.requires.join(", "));
            }
            println!();
        }
    }
}

impl PlanResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Application order for {}:\n", self.requested.join(", "));
                for (i, id) in self.order.iter().enumerate() {
                    println!("  {}. {id}", i + 1);
                }
            },
            OutputMode::Json => render_json(self),
        }
    }
}

impl ComposeResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => render_json(self),
        }
    }

    fn render_human(&self) {
        for composed in &self.modules {
            let module = &composed.configuration;
            println!("{} {}", "Module".bold(), module.name().bold());
            println!("  conventions: {}", join(module.applied_conventions().iter().map(ConventionId::as_str)));
            if let Some(toolchain) = module.toolchain() {
                println!("  toolchain:   {}", toolchain.target);
            }
            if !module.plugins().is_empty() {
                println!("  plugins:     {}", module.plugins().join(", "));
            }
            if !module.compiler().flags.is_empty() {
                println!("  compiler:    {}", module.compiler().flags.join(" "));
            }
            if !module.secondary_compiler().flags.is_empty() {
                println!("  secondary:   {}", module.secondary_compiler().flags.join(" "));
            }
            for edge in module.task_edges() {
                println!("  task:        {} dependsOn {}", edge.task, edge.depends_on);
            }
            if let Some(engine) = module.test_task().engine {
                let events = join(module.test_task().logged_events.iter().map(ToString::to_string));
                println!("  tests:       {engine:?} (logging {events})");
            }
            if !module.dependencies().is_empty() {
                println!("  dependencies:");
                for dependency in module.dependencies() {
                    println!("    {dependency}");
                }
            }
            println!();
        }

        for failure in &self.failures {
            println!("{} {}: {}", "FAILED".red().bold(), failure.module, failure.error);
        }

        if self.success {
            println!("{} {} module(s) composed", "OK".green().bold(), self.modules.len());
        }
    }
}

impl LookupResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{} {} = {}", self.kind, self.key, self.entry),
            OutputMode::Json => render_json(self),
        }
    }
}

fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(", ")
    }
}
