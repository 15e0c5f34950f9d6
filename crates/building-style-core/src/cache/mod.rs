//! Local caching of the building style catalog.
//!
//! `BuildingStyleManager` keeps the catalog in memory and writes it back
//! through a `CatalogStore` only when it has changed. The shipped store
//! is `JsonCatalogStore`, which keeps one JSON object per catalog on disk.
//! When no store exists yet a `BootstrapSource` provides the first catalog.

pub mod codec;
pub mod json_store;
pub mod manager;
pub mod store;

pub use json_store::JsonCatalogStore;
pub use manager::{BuildingStyleManager, StyleCatalog};
pub use store::{BootstrapSource, CatalogStore, StaticBootstrap};
