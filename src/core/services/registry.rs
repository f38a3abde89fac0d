//! Convention registry
//!
//! Maps stable id strings to convention factories. Each factory receives the
//! registry's catalog, so conventions never reach for ambient state.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use buildlogic::core::models::{ConventionId, VersionCatalog};
//! use buildlogic::core::services::ConventionRegistry;
//!
//! let registry = ConventionRegistry::with_builtins(Arc::new(VersionCatalog::default()));
//! let convention = registry.resolve(&ConventionId::new("microservice-conventions")).unwrap();
//! assert_eq!(convention.requires().len(), 2);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::error::ComposeError;
use crate::core::models::ConventionId;
use crate::core::ports::{Catalog, Convention};

use super::conventions::{BuiltinConvention, BuiltinKind};

/// Builds a convention bound to a catalog
pub type ConventionFactory = Box<dyn Fn(Arc<dyn Catalog>) -> Box<dyn Convention> + Send + Sync>;

/// Registry of conventions by id
pub struct ConventionRegistry {
    catalog: Arc<dyn Catalog>,
    /// Registration order, used for deterministic listings
    order: Vec<ConventionId>,
    factories: HashMap<ConventionId, ConventionFactory>,
}

impl ConventionRegistry {
    /// Create an empty registry over a catalog
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            order: Vec::new(),
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding the five built-in conventions
    #[must_use]
    pub fn with_builtins(catalog: Arc<dyn Catalog>) -> Self {
        let mut registry = Self::new(catalog);
        for kind in BuiltinKind::ALL {
            registry.insert(
                kind.id(),
                Box::new(move |catalog: Arc<dyn Catalog>| -> Box<dyn Convention> {
                    Box::new(BuiltinConvention::new(kind, catalog))
                }),
            );
        }
        registry
    }

    /// Register a convention factory under an id
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::DuplicateConventionId`] if the id is taken;
    /// the existing registration is kept.
    pub fn register<F>(&mut self, id: impl Into<ConventionId>, factory: F) -> Result<(), ComposeError>
    where
        F: Fn(Arc<dyn Catalog>) -> Box<dyn Convention> + Send + Sync + 'static,
    {
        let id = id.into();
        if self.factories.contains_key(&id) {
            return Err(ComposeError::DuplicateConventionId(id));
        }
        log::debug!("registered convention '{id}'");
        self.insert(id, Box::new(factory));
        Ok(())
    }

    fn insert(&mut self, id: ConventionId, factory: ConventionFactory) {
        self.order.push(id.clone());
        self.factories.insert(id, factory);
    }

    /// Construct the convention registered under an id
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::UnknownConventionId`] if nothing is registered.
    pub fn resolve(&self, id: &ConventionId) -> Result<Box<dyn Convention>, ComposeError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ComposeError::UnknownConventionId(id.to_string()))?;
        Ok(factory(Arc::clone(&self.catalog)))
    }

    /// Whether an id is registered
    #[must_use]
    pub fn contains(&self, id: &ConventionId) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered ids in registration order
    #[must_use]
    pub fn ids(&self) -> &[ConventionId] {
        &self.order
    }

    /// The catalog handed to every factory
    #[must_use]
    pub const fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }
}

impl fmt::Debug for ConventionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionRegistry")
            .field("catalog", &self.catalog)
            .field("conventions", &self.order)
            .finish()
    }
}
