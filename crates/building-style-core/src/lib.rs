//! Building style catalog cache.
//!
//! Keeps the catalog of building style metadata in memory, persists it
//! as a JSON file, and falls back to a bootstrap source the first time
//! no cache file exists.
//!
//! ```no_run
//! use building_style_core::{BuildingStyleManager, Config, StaticBootstrap};
//!
//! # fn main() -> anyhow::Result<()> {
//! let path = Config::load()?.cache_path()?;
//! let manager = BuildingStyleManager::with_json_file(path, StaticBootstrap::default())?;
//! let styles = manager.building_styles()?;
//! manager.set_building_styles(styles);
//! manager.save()?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{
    BootstrapSource, BuildingStyleManager, CatalogStore, JsonCatalogStore, StaticBootstrap,
    StyleCatalog,
};
pub use config::Config;
pub use error::{BoxError, Result, StoreError};
pub use models::{BuildingStyleInfo, Catalog};
