//! Catalog loading from disk.

use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;

use crate::catalog::{CardIndex, Catalog, CatalogError};
use crate::observability::metrics;

/// Read and parse the dataset at `path`.
pub async fn load_index(path: &Path) -> Result<CardIndex, CatalogError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CardIndex::from_slice(&bytes)
}

/// Blocking variant for callers outside the runtime (file watcher thread).
pub fn load_index_blocking(path: &Path) -> Result<CardIndex, CatalogError> {
    let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CardIndex::from_slice(&bytes)
}

/// Load `path` into `catalog`, then mark it ready regardless of outcome.
///
/// Failures are logged and leave whatever index was there (empty at startup).
pub async fn load_into(catalog: &Catalog, path: &Path) {
    match load_index(path).await {
        Ok(index) => {
            tracing::info!(path = %path.display(), cards = index.len(), "Catalog loaded");
            metrics::record_catalog_load("ok");
            catalog.install(index);
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Catalog load failed, serving empty catalog");
            metrics::record_catalog_load("error");
        }
    }
    catalog.mark_ready();
}

/// Start the initial load in the background. No retry, no timeout.
pub fn spawn_initial_load(catalog: Catalog, path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        load_into(&catalog, &path).await;
    })
}
