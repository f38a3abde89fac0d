//! Centralized path definitions for buildlogic
//!
//! ## Layout
//!
//! ```text
//! build-root/
//! ├── buildlogic.toml              # Build descriptor: catalog + module requests
//! ├── gradle/
//! │   └── libs.versions.toml       # Version catalog (default location)
//! └── services/order/              # Any subdirectory finds the descriptor above
//! ```
//!
//! ## Descriptor discovery
//!
//! 1. An explicit path (`--descriptor`)
//! 2. `$BUILDLOGIC_DESCRIPTOR` if set
//! 3. The nearest `buildlogic.toml`, walking up from the working directory

use std::path::{Path, PathBuf};

/// Build descriptor filename
pub const DESCRIPTOR_FILE: &str = "buildlogic.toml";

/// Environment variable overriding descriptor discovery
pub const DESCRIPTOR_ENV: &str = "BUILDLOGIC_DESCRIPTOR";

/// Catalog location used when the descriptor does not name one
pub const DEFAULT_CATALOG: &str = "gradle/libs.versions.toml";

/// Find the nearest descriptor from `from` up to the filesystem root
#[must_use]
pub fn find_descriptor(from: &Path) -> Option<PathBuf> {
    let mut current = from.to_path_buf();

    // Normalize: if it's a file, start from parent
    if current.is_file() {
        current = current.parent().unwrap_or(from).to_path_buf();
    }

    loop {
        let candidate = current.join(DESCRIPTOR_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the descriptor path using the discovery order above
///
/// `env_override` is the value of [`DESCRIPTOR_ENV`], passed in so callers
/// (and tests) control the environment.
#[must_use]
pub fn resolve_descriptor(
    explicit: Option<&Path>,
    env_override: Option<&str>,
    cwd: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env_override.filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    find_descriptor(cwd)
}

/// Resolve a path named inside the descriptor relative to its directory
#[must_use]
pub fn relative_to_descriptor(descriptor: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    descriptor
        .parent()
        .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
}
