//! Seams between the manager and where catalogs come from.

use crate::error::{BoxError, Result};
use crate::models::Catalog;

/// Durable storage for a catalog.
///
/// `load` must fail with `StoreError::NotFound` when the store does not
/// exist yet; the manager treats that case specially.
pub trait CatalogStore: Send + Sync {
    fn load(&self) -> Result<Catalog>;

    fn save(&self, catalog: &Catalog) -> Result<()>;
}

/// Provider of the initial catalog, consulted only when no store exists.
pub trait BootstrapSource: Send + Sync {
    fn fetch(&self) -> std::result::Result<Catalog, BoxError>;
}

impl<F> BootstrapSource for F
where
    F: Fn() -> std::result::Result<Catalog, BoxError> + Send + Sync,
{
    fn fetch(&self) -> std::result::Result<Catalog, BoxError> {
        self()
    }
}

/// Bootstrap source that hands out a fixed catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticBootstrap {
    catalog: Catalog,
}

impl StaticBootstrap {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl BootstrapSource for StaticBootstrap {
    fn fetch(&self) -> std::result::Result<Catalog, BoxError> {
        Ok(self.catalog.clone())
    }
}
