//! Catalog file watcher for hot reload.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::catalog::loader::load_index_blocking;
use crate::catalog::Catalog;
use crate::observability::metrics;

/// A watcher that reloads the catalog when its dataset file changes.
///
/// The parent directory is watched rather than the file itself so that
/// editors which replace the file by rename are still picked up.
pub struct CatalogWatcher {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogWatcher {
    pub fn new(path: &Path, catalog: Catalog) -> Self {
        Self {
            path: path.to_path_buf(),
            catalog,
        }
    }

    /// Start watching in a background thread. Keep the returned watcher
    /// alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let catalog = self.catalog.clone();
        let file_name = path.file_name().map(OsString::from);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_catalog = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(OsString::from) == file_name);
                    if !touches_catalog {
                        return;
                    }

                    tracing::info!(path = %path.display(), "Catalog file change detected, reloading");
                    match load_index_blocking(&path) {
                        Ok(index) => {
                            tracing::info!(cards = index.len(), "Catalog reloaded");
                            metrics::record_catalog_load("reload_ok");
                            catalog.install(index);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload catalog. Keeping current index.");
                            metrics::record_catalog_load("reload_error");
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Catalog watcher started");
        Ok(watcher)
    }
}
