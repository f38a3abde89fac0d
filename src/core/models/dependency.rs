//! Dependency edges declared on a module

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// The configuration a dependency is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    /// Main compile classpath (`implementation`)
    Compile,
    /// Test compile classpath (`testImplementation`)
    TestCompile,
    /// Test runtime only (`testRuntimeOnly`)
    TestRuntime,
    /// Annotation processing and other auxiliary configurations
    Annotation,
}

impl DependencyScope {
    /// The Gradle configuration name for this scope
    #[must_use]
    pub const fn configuration(self) -> &'static str {
        match self {
            Self::Compile => "implementation",
            Self::TestCompile => "testImplementation",
            Self::TestRuntime => "testRuntimeOnly",
            Self::Annotation => "annotationProcessor",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.configuration())
    }
}

/// How the coordinate is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// A regular library artifact
    #[default]
    Library,
    /// A platform (BOM) that only contributes version constraints
    Platform,
}

/// A transitive exclusion rule
///
/// Either field may be absent; an absent field matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exclusion {
    /// Group to exclude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Module name to exclude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl Exclusion {
    /// Exclude every artifact of a group
    pub fn group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            module: None,
        }
    }

    /// Whether this rule excludes the given coordinate
    #[must_use]
    pub fn matches(&self, coordinate: &Coordinate) -> bool {
        self.group.as_ref().is_none_or(|g| *g == coordinate.group)
            && self.module.as_ref().is_none_or(|m| *m == coordinate.name)
    }
}

/// One dependency declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Configuration the dependency is added to
    pub scope: DependencyScope,
    /// Library or platform
    #[serde(default)]
    pub notation: Notation,
    /// The artifact
    pub coordinate: Coordinate,
    /// Transitive exclusions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<Exclusion>,
}

impl DependencyEdge {
    /// A library dependency
    #[must_use]
    pub const fn library(scope: DependencyScope, coordinate: Coordinate) -> Self {
        Self {
            scope,
            notation: Notation::Library,
            coordinate,
            exclusions: Vec::new(),
        }
    }

    /// A platform (BOM) dependency
    #[must_use]
    pub const fn platform(scope: DependencyScope, coordinate: Coordinate) -> Self {
        Self {
            scope,
            notation: Notation::Platform,
            coordinate,
            exclusions: Vec::new(),
        }
    }

    /// Add an exclusion rule
    #[must_use]
    pub fn excluding(mut self, exclusion: Exclusion) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    /// Whether this edge is a platform import
    #[must_use]
    pub fn is_platform(&self) -> bool {
        self.notation == Notation::Platform
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notation {
            Notation::Library => write!(f, "{}(\"{}\")", self.scope, self.coordinate)?,
            Notation::Platform => write!(f, "{}(platform(\"{}\"))", self.scope, self.coordinate)?,
        }
        for exclusion in &self.exclusions {
            match (&exclusion.group, &exclusion.module) {
                (Some(g), Some(m)) => write!(f, " exclude {g}:{m}")?,
                (Some(g), None) => write!(f, " exclude group {g}")?,
                (None, Some(m)) => write!(f, " exclude module {m}")?,
                (None, None) => write!(f, " exclude *")?,
            }
        }
        Ok(())
    }
}
