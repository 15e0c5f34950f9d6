use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::codec::{decode_catalog, encode_catalog};
use super::store::CatalogStore;
use crate::error::{Result, StoreError};
use crate::models::Catalog;

/// Catalog store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.to_string_lossy().trim().is_empty() {
            return Err(StoreError::InvalidPath);
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl CatalogStore for JsonCatalogStore {
    fn load(&self) -> Result<Catalog> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                path: self.path.clone(),
            },
            _ => StoreError::io(&self.path, e),
        })?;

        let catalog = decode_catalog(BufReader::new(file)).map_err(|e| {
            if e.is_io() {
                StoreError::io(&self.path, io::Error::from(e))
            } else {
                StoreError::Decode {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        debug!(
            path = %self.path.display(),
            styles = catalog.len(),
            "Loaded building style catalog"
        );
        Ok(catalog)
    }

    /// Replace the file in full: write a sibling temp file, sync it, then
    /// rename it over the target.
    fn save(&self, catalog: &Catalog) -> Result<()> {
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            encode_catalog(&mut writer, catalog)
                .map_err(|e| StoreError::io(tmp.path(), io::Error::from(e)))?;
            writer.flush().map_err(|e| StoreError::io(tmp.path(), e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)?;

        debug!(
            path = %self.path.display(),
            styles = catalog.len(),
            "Saved building style catalog"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BuildingStyleInfo;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(0x2000, BuildingStyleInfo::new("Chicago", "Maxis", "1890s"));
        catalog.insert(0x2001, BuildingStyleInfo::new("New York", "Maxis", ""));
        catalog
    }

    #[test]
    fn test_new_rejects_blank_path() {
        assert!(matches!(JsonCatalogStore::new(""), Err(StoreError::InvalidPath)));
        assert!(matches!(JsonCatalogStore::new("   "), Err(StoreError::InvalidPath)));
        assert!(JsonCatalogStore::new("styles.json").is_ok());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCatalogStore::new(dir.path().join("styles.json")).unwrap();
        let err = store.load().unwrap_err();
        assert!(err.is_not_found(), "unexpected error: {err}");
    }

    #[test]
    fn test_load_malformed_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonCatalogStore::new(&path).unwrap();
        assert!(matches!(store.load(), Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_load_file_with_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        std::fs::write(&path, b"\xEF\xBB\xBF{\"8192\": {\"name\": \"Chicago\"}}").unwrap();

        let store = JsonCatalogStore::new(&path).unwrap();
        let catalog = store.load().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[&8192].name(), "Chicago");
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCatalogStore::new(dir.path()).unwrap();
        let err = store.load().unwrap_err();
        assert!(!err.is_not_found());
        assert!(!matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCatalogStore::new(dir.path().join("nested").join("styles.json")).unwrap();

        store.save(&sample_catalog()).unwrap();
        assert_eq!(store.load().unwrap(), sample_catalog());
    }

    #[test]
    fn test_save_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        std::fs::write(&path, r#"{"1": {"name": "old"}, "2": {"name": "older"}}"#).unwrap();

        let store = JsonCatalogStore::new(&path).unwrap();
        store.save(&Catalog::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_saved_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        let store = JsonCatalogStore::new(&path).unwrap();

        let mut catalog = Catalog::new();
        catalog.insert(7, BuildingStyleInfo::new("Paris", "Maxis", "Mansard roofs"));
        store.save(&catalog).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "7": { "name": "Paris", "author": "Maxis", "description": "Mansard roofs" }
            })
        );
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonCatalogStore::new(dir.path().join("styles.json")).unwrap();
        store.save(&sample_catalog()).unwrap();
        store.save(&sample_catalog()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
