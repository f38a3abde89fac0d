//! Port traits (interfaces) at the seams of the composition core
//!
//! - [`Catalog`] - read-only coordinate lookup, implemented by
//!   [`VersionCatalog`](super::models::VersionCatalog)
//! - [`Convention`] - a configuration profile, implemented by the built-ins
//!   and by anything else a registry is given

mod catalog;
mod convention;

pub use catalog::Catalog;
pub use convention::Convention;
