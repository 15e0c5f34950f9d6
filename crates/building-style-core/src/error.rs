use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by external collaborators such as the bootstrap source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Catalog store not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to decode catalog store {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on catalog store {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to replace catalog store: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Catalog store path must not be empty")]
    InvalidPath,

    #[error("Bootstrap source failed: {0}")]
    Bootstrap(#[source] BoxError),
}

impl StoreError {
    /// True when the backing store is absent, the one load failure the manager recovers from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
