use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::json_store::JsonCatalogStore;
use super::store::{BootstrapSource, CatalogStore};
use crate::error::{Result, StoreError};
use crate::models::Catalog;

/// Read/replace/persist access to the current building style catalog.
pub trait StyleCatalog {
    /// Current catalog, loading it on first use.
    fn building_styles(&self) -> Result<Catalog>;

    /// Replace the whole catalog; always leaves it dirty.
    fn set_building_styles(&self, styles: Catalog);

    /// Persist the catalog if it is loaded and has unsaved changes.
    fn save(&self) -> Result<()>;

    fn is_dirty(&self) -> bool;
}

#[derive(Debug, Default)]
struct ManagerState {
    styles: Option<Catalog>,
    dirty: bool,
}

/// Caches the building style catalog in memory and tracks unsaved changes.
///
/// The catalog is loaded lazily from the store. If the store does not
/// exist yet, the bootstrap source supplies the catalog and it is marked
/// dirty so the first `save` writes it out. Catalog and dirty flag live
/// behind one mutex and are always updated together.
pub struct BuildingStyleManager {
    store: Box<dyn CatalogStore>,
    bootstrap: Box<dyn BootstrapSource>,
    state: Mutex<ManagerState>,
}

impl BuildingStyleManager {
    pub fn new(store: Box<dyn CatalogStore>, bootstrap: Box<dyn BootstrapSource>) -> Self {
        Self {
            store,
            bootstrap,
            state: Mutex::new(ManagerState::default()),
        }
    }

    /// Manager persisting to a JSON file at `path`.
    pub fn with_json_file(
        path: impl Into<PathBuf>,
        bootstrap: impl BootstrapSource + 'static,
    ) -> Result<Self> {
        let store = JsonCatalogStore::new(path)?;
        Ok(Self::new(Box::new(store), Box::new(bootstrap)))
    }

    // State is only written after the fallible call it depends on has
    // succeeded, so a poisoned lock still guards a consistent pair.
    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn building_styles(&self) -> Result<Catalog> {
        let mut state = self.lock();

        if state.styles.is_none() {
            match self.store.load() {
                Ok(styles) => {
                    debug!(styles = styles.len(), "Building styles loaded from store");
                    state.styles = Some(styles);
                    state.dirty = false;
                }
                Err(StoreError::NotFound { path }) => {
                    debug!(
                        path = %path.display(),
                        "No building style store, using bootstrap source"
                    );
                    let styles = self.bootstrap.fetch().map_err(StoreError::Bootstrap)?;
                    state.styles = Some(styles);
                    state.dirty = true;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(state.styles.clone().unwrap_or_default())
    }

    pub fn set_building_styles(&self, styles: Catalog) {
        let mut state = self.lock();
        debug!(styles = styles.len(), "Building styles replaced");
        state.styles = Some(styles);
        state.dirty = true;
    }

    pub fn save(&self) -> Result<()> {
        let mut state = self.lock();

        let styles = match state.styles.as_ref() {
            Some(styles) if state.dirty => styles,
            _ => {
                debug!("Building styles unchanged, skipping save");
                return Ok(());
            }
        };

        self.store.save(styles)?;
        state.dirty = false;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    /// Whether a catalog has been loaded or set.
    pub fn is_loaded(&self) -> bool {
        self.lock().styles.is_some()
    }
}

impl StyleCatalog for BuildingStyleManager {
    fn building_styles(&self) -> Result<Catalog> {
        BuildingStyleManager::building_styles(self)
    }

    fn set_building_styles(&self, styles: Catalog) {
        BuildingStyleManager::set_building_styles(self, styles)
    }

    fn save(&self) -> Result<()> {
        BuildingStyleManager::save(self)
    }

    fn is_dirty(&self) -> bool {
        BuildingStyleManager::is_dirty(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
