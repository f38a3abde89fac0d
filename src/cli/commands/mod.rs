//! Command implementations

mod compose;
mod conventions;
mod lookup;
mod plan;

use std::path::{Path, PathBuf};

use anyhow::Context;

use buildlogic::adapters::toml::load_catalog;
use buildlogic::config::{BuildDescriptor, LoadedDescriptor};
use buildlogic::core::models::VersionCatalog;

pub use compose::compose;
pub use conventions::conventions;
pub use lookup::lookup;
pub use plan::plan;

/// Where the descriptor and catalog come from
#[derive(Debug, Default)]
pub struct Sources {
    /// Explicit descriptor path
    pub descriptor: Option<PathBuf>,
    /// Explicit catalog path
    pub catalog: Option<PathBuf>,
}

impl Sources {
    /// Discover and load the build descriptor
    pub fn descriptor(&self) -> anyhow::Result<LoadedDescriptor> {
        let cwd = std::env::current_dir()?;
        Ok(BuildDescriptor::discover(self.descriptor.as_deref(), &cwd)?)
    }

    /// Load the catalog named by `--catalog`, or else by the descriptor
    pub fn catalog(&self, descriptor: Option<&LoadedDescriptor>) -> anyhow::Result<VersionCatalog> {
        if let Some(path) = &self.catalog {
            return read_catalog(path);
        }
        let path = match descriptor {
            Some(loaded) => loaded.catalog_path(),
            None => self.descriptor()?.catalog_path(),
        };
        read_catalog(&path)
    }
}

fn read_catalog(path: &Path) -> anyhow::Result<VersionCatalog> {
    load_catalog(path).with_context(|| format!("cannot load version catalog {}", path.display()))
}
