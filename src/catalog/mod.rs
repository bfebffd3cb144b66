//! Card catalog subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     loader.rs reads the dataset file (tokio::fs, off the request path)
//!     → index.rs builds an immutable CardIndex
//!     → Catalog swaps it in and flips the readiness flag
//!
//! Request:
//!     GET /cards → Catalog::search
//!     → waits for readiness
//!     → CardIndex::search against the current snapshot
//!
//! Optional reload (watcher.rs):
//!     dataset file modified → reparse → atomic swap
//! ```
//!
//! # Design Decisions
//! - The index is owned by a `Catalog` handle injected into handlers, never global
//! - A failed load still marks the catalog ready, leaving it empty
//! - Snapshots are `Arc<CardIndex>`; a reload never disturbs an in-flight search

pub mod index;
pub mod loader;
pub mod watcher;

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::sync::watch;

use crate::observability::metrics;

pub use index::{CardIndex, MAX_RESULTS};
pub use loader::{load_index, spawn_initial_load};
pub use watcher::CatalogWatcher;

/// Errors raised while reading or parsing the card dataset.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected catalog shape: {0}")]
    Shape(String),
}

/// Shared handle to the current card index and its readiness state.
#[derive(Clone)]
pub struct Catalog {
    index: Arc<ArcSwap<CardIndex>>,
    ready: Arc<watch::Sender<bool>>,
}

impl Catalog {
    /// An empty catalog that is not ready yet.
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            index: Arc::new(ArcSwap::from_pointee(CardIndex::empty())),
            ready: Arc::new(ready),
        }
    }

    /// A catalog that is immediately ready with the given index.
    pub fn with_index(index: CardIndex) -> Self {
        let catalog = Self::new();
        catalog.install(index);
        catalog.mark_ready();
        catalog
    }

    /// Replace the current index.
    pub fn install(&self, index: CardIndex) {
        metrics::record_catalog_size(index.len());
        self.index.store(Arc::new(index));
    }

    /// Signal that the initial load attempt has finished.
    pub fn mark_ready(&self) {
        self.ready.send_replace(true);
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Resolve once the initial load attempt has finished.
    pub async fn wait_ready(&self) {
        let mut rx = self.ready.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// The index as it is right now.
    pub fn snapshot(&self) -> Arc<CardIndex> {
        self.index.load_full()
    }

    /// Prefix search that never runs against a half-loaded catalog.
    pub async fn search(&self, prefix: Option<&str>) -> Vec<String> {
        self.wait_ready().await;
        self.snapshot().search(prefix)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
