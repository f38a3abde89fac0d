//! Convention identifiers
//!
//! The stable strings a module's build descriptor uses to request
//! conventions (e.g. `microservice-conventions`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace prefix carried by plugin-style ids (`buildlogic.language-conventions`)
pub const ID_NAMESPACE: &str = "buildlogic.";

/// A convention identifier
///
/// The `buildlogic.` namespace prefix is accepted and stripped, so
/// `buildlogic.language-conventions` and `language-conventions` name the
/// same convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ConventionId(String);

impl ConventionId {
    /// Create an id from a raw string, stripping the namespace prefix
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().trim();
        let bare = raw.strip_prefix(ID_NAMESPACE).unwrap_or(raw);
        Self(bare.to_string())
    }

    /// The bare id string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fully-qualified plugin-style id
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{ID_NAMESPACE}{}", self.0)
    }
}

impl fmt::Display for ConventionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConventionId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ConventionId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<ConventionId> for String {
    fn from(id: ConventionId) -> Self {
        id.0
    }
}

impl AsRef<str> for ConventionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
