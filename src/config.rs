//! Build descriptor
//!
//! The descriptor (`buildlogic.toml`) names the version catalog and lists
//! the modules of the build with the conventions each one requests:
//!
//! ```toml
//! catalog = "gradle/libs.versions.toml"
//!
//! [[module]]
//! name = "order-service"
//! conventions = ["microservice-conventions", "event-driven-conventions"]
//!
//! [[module]]
//! name = "order-domain"
//! conventions = ["buildlogic.language-conventions"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::ModuleRequest;
use crate::paths;

/// Errors from loading a build descriptor
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// No descriptor could be found
    #[error("no buildlogic.toml found (searched from '{searched_from}')")]
    NotFound {
        /// Directory the search started in
        searched_from: PathBuf,
    },

    /// The file could not be read
    #[error("failed to read descriptor '{path}': {source}")]
    Read {
        /// Descriptor path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not a valid descriptor
    #[error("failed to parse descriptor '{path}': {message}")]
    Parse {
        /// Descriptor path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A module has an empty name
    #[error("module #{index} has an empty name")]
    EmptyModuleName {
        /// 1-based position in the file
        index: usize,
    },

    /// Two modules share a name
    #[error("module '{0}' is declared more than once")]
    DuplicateModule(String),
}

/// A parsed build descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildDescriptor {
    /// Catalog path, relative to the descriptor
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// Modules in declaration order
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleRequest>,
}

fn default_catalog() -> PathBuf {
    PathBuf::from(paths::DEFAULT_CATALOG)
}

impl Default for BuildDescriptor {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            modules: Vec::new(),
        }
    }
}

/// A descriptor together with where it was loaded from
#[derive(Debug, Clone)]
pub struct LoadedDescriptor {
    /// Path of the descriptor file
    pub path: PathBuf,
    /// Parsed content
    pub descriptor: BuildDescriptor,
}

impl LoadedDescriptor {
    /// Catalog path resolved against the descriptor's directory
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        paths::relative_to_descriptor(&self.path, &self.descriptor.catalog)
    }

    /// Find a module request by name
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&ModuleRequest> {
        self.descriptor.modules.iter().find(|m| m.name == name)
    }
}

impl BuildDescriptor {
    /// Parse and validate descriptor text
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML, empty module names, or duplicate
    /// module names.
    pub fn parse(content: &str, path: &Path) -> Result<Self, DescriptorError> {
        let descriptor: Self = toml::from_str(content).map_err(|e| DescriptorError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Load a descriptor file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<LoadedDescriptor, DescriptorError> {
        let content = fs::read_to_string(path).map_err(|source| DescriptorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let descriptor = Self::parse(&content, path)?;
        log::debug!(
            "loaded descriptor {} ({} modules)",
            path.display(),
            descriptor.modules.len()
        );
        Ok(LoadedDescriptor {
            path: path.to_path_buf(),
            descriptor,
        })
    }

    /// Discover and load the descriptor
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::NotFound`] if discovery fails, otherwise
    /// the errors of [`load`](Self::load).
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedDescriptor, DescriptorError> {
        let env_override = std::env::var(paths::DESCRIPTOR_ENV).ok();
        let path = paths::resolve_descriptor(explicit, env_override.as_deref(), cwd).ok_or_else(|| {
            DescriptorError::NotFound {
                searched_from: cwd.to_path_buf(),
            }
        })?;
        Self::load(&path)
    }

    fn validate(&self) -> Result<(), DescriptorError> {
        let mut seen = HashSet::new();
        for (index, module) in self.modules.iter().enumerate() {
            if module.name.trim().is_empty() {
                return Err(DescriptorError::EmptyModuleName { index: index + 1 });
            }
            if !seen.insert(module.name.as_str()) {
                return Err(DescriptorError::DuplicateModule(module.name.clone()));
            }
        }
        Ok(())
    }
}
