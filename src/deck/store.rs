//! Single-file deck document store.

use std::path::{Path, PathBuf};

use serde_json::Value;
use uuid::Uuid;

use crate::deck::DeckError;
use crate::observability::metrics;

/// Persists one opaque JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct DeckStore {
    path: PathBuf,
}

impl DeckStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the persisted deck with `document`.
    ///
    /// The previous contents are discarded unconditionally. Concurrent calls
    /// each write their own temp file, and the last rename to land wins.
    pub async fn save(&self, document: &Value) -> Result<(), DeckError> {
        let result = self.write_atomic(document).await;
        metrics::record_deck_save(if result.is_ok() { "ok" } else { "error" });
        result
    }

    async fn write_atomic(&self, document: &Value) -> Result<(), DeckError> {
        let bytes = serde_json::to_vec(document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(parent, source))?;
        }

        let tmp = self.temp_path();
        if let Err(source) = tokio::fs::write(&tmp, &bytes).await {
            return Err(self.io_error(&tmp, source));
        }
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.io_error(&self.path, source));
        }

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Deck written");
        Ok(())
    }

    /// The persisted deck bytes, verbatim.
    pub async fn load(&self) -> Result<Vec<u8>, DeckError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DeckError::NotFound(self.path.clone()))
            }
            Err(source) => Err(self.io_error(&self.path, source)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "deck".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4()))
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> DeckError {
        DeckError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
