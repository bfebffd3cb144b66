//! Deck persistence subsystem.
//!
//! # Data Flow
//! ```text
//! POST /save (any JSON)
//!     → store.rs serializes the document
//!     → temp sibling file → atomic rename over the deck file
//!
//! GET /deck
//!     → store.rs reads the deck file verbatim
//! ```
//!
//! # Design Decisions
//! - Exactly one deck document exists; every save replaces it wholesale
//! - The store is content-agnostic: no schema, no validation
//! - Rename-based writes: concurrent saves resolve to one whole document

pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use store::DeckStore;

/// Errors raised by the deck store.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("no deck has been saved at {0}")]
    NotFound(PathBuf),

    #[error("deck I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize deck: {0}")]
    Serialize(#[from] serde_json::Error),
}
