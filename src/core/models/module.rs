//! Module build configuration
//!
//! A module is one compilation/test unit of a multi-module build. It starts
//! empty and is mutated only by conventions during composition. The final
//! value is what the host build executor consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConventionId, DependencyEdge, DependencyScope};

/// Options for one compiler (primary language or secondary language)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Free-form compiler arguments, in declaration order
    #[serde(default)]
    pub flags: Vec<String>,
    /// Treat all warnings as errors
    #[serde(default)]
    pub all_warnings_as_errors: bool,
    /// Enable progressive mode
    #[serde(default)]
    pub progressive_mode: bool,
}

impl CompilerOptions {
    /// Append flags
    pub fn add_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flags.extend(flags.into_iter().map(Into::into));
    }
}

/// The toolchain target for the module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    /// Bytecode/language target (e.g. `21`)
    pub target: String,
}

/// `task` must run after `depends_on`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskEdge {
    /// The dependent task
    pub task: String,
    /// The task it depends on
    pub depends_on: String,
}

/// Test engine selected for the test task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestEngine {
    /// JUnit Platform (`useJUnitPlatform()`)
    JunitPlatform,
}

/// Test event categories the test task logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestEvent {
    /// A test passed
    Passed,
    /// A test was skipped
    Skipped,
    /// A test failed
    Failed,
}

impl fmt::Display for TestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Skipped => write!(f, "skipped"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Settings of the test-execution task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTaskSettings {
    /// Selected engine, if any convention chose one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<TestEngine>,
    /// Logged event categories
    #[serde(default)]
    pub logged_events: Vec<TestEvent>,
}

/// A module as declared by a build descriptor: its name and the
/// conventions it asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRequest {
    /// Module name
    pub name: String,
    /// Requested convention ids, in declaration order
    #[serde(default)]
    pub conventions: Vec<ConventionId>,
}

/// A module and its mutable build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    name: String,
    #[serde(default)]
    plugins: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    toolchain: Option<Toolchain>,
    #[serde(default)]
    compiler: CompilerOptions,
    #[serde(default)]
    secondary_compiler: CompilerOptions,
    #[serde(default)]
    dependencies: Vec<DependencyEdge>,
    #[serde(default)]
    task_edges: Vec<TaskEdge>,
    #[serde(default)]
    test_task: TestTaskSettings,
    #[serde(default)]
    applied_conventions: Vec<ConventionId>,
}

impl Module {
    /// Create an unconfigured module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugins: Vec::new(),
            toolchain: None,
            compiler: CompilerOptions::default(),
            secondary_compiler: CompilerOptions::default(),
            dependencies: Vec::new(),
            task_edges: Vec::new(),
            test_task: TestTaskSettings::default(),
            applied_conventions: Vec::new(),
        }
    }

    /// Module name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Plugins ===

    /// Enable a sub-plugin; enabling twice is a no-op
    pub fn apply_plugin(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.plugins.contains(&id) {
            self.plugins.push(id);
        }
    }

    /// Enabled sub-plugins in application order
    #[must_use]
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Whether a sub-plugin is enabled
    #[must_use]
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p == id)
    }

    // === Toolchain and compilers ===

    /// Set the toolchain target
    pub fn set_toolchain(&mut self, target: impl Into<String>) {
        self.toolchain = Some(Toolchain {
            target: target.into(),
        });
    }

    /// The toolchain target, if configured
    #[must_use]
    pub const fn toolchain(&self) -> Option<&Toolchain> {
        self.toolchain.as_ref()
    }

    /// Primary compiler options
    #[must_use]
    pub const fn compiler(&self) -> &CompilerOptions {
        &self.compiler
    }

    /// Primary compiler options (mutable)
    pub const fn compiler_mut(&mut self) -> &mut CompilerOptions {
        &mut self.compiler
    }

    /// Secondary compiler options
    #[must_use]
    pub const fn secondary_compiler(&self) -> &CompilerOptions {
        &self.secondary_compiler
    }

    /// Secondary compiler options (mutable)
    pub const fn secondary_compiler_mut(&mut self) -> &mut CompilerOptions {
        &mut self.secondary_compiler
    }

    // === Dependencies ===

    /// Declare a dependency; duplicates are kept
    pub fn add_dependency(&mut self, edge: DependencyEdge) {
        self.dependencies.push(edge);
    }

    /// All declared dependencies in declaration order
    #[must_use]
    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    /// Dependencies declared in one scope
    pub fn dependencies_in(&self, scope: DependencyScope) -> impl Iterator<Item = &DependencyEdge> {
        self.dependencies.iter().filter(move |d| d.scope == scope)
    }

    // === Tasks ===

    /// Make `task` depend on `depends_on`; an existing edge is not duplicated
    pub fn add_task_dependency(&mut self, task: impl Into<String>, depends_on: impl Into<String>) {
        let edge = TaskEdge {
            task: task.into(),
            depends_on: depends_on.into(),
        };
        if !self.task_edges.contains(&edge) {
            self.task_edges.push(edge);
        }
    }

    /// Task graph edges
    #[must_use]
    pub fn task_edges(&self) -> &[TaskEdge] {
        &self.task_edges
    }

    /// Test task settings
    #[must_use]
    pub const fn test_task(&self) -> &TestTaskSettings {
        &self.test_task
    }

    /// Test task settings (mutable)
    pub const fn test_task_mut(&mut self) -> &mut TestTaskSettings {
        &mut self.test_task
    }

    // === Applied conventions ===

    /// Whether a convention has already been applied
    #[must_use]
    pub fn has_applied(&self, id: &ConventionId) -> bool {
        self.applied_conventions.contains(id)
    }

    /// Applied conventions in application order
    #[must_use]
    pub fn applied_conventions(&self) -> &[ConventionId] {
        &self.applied_conventions
    }

    /// Record a convention as applied
    pub(crate) fn mark_applied(&mut self, id: ConventionId) {
        if !self.has_applied(&id) {
            self.applied_conventions.push(id);
        }
    }
}
