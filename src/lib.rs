//! Deck builder backend.
//!
//! Serves prefix search over a static card catalog and persists a single
//! deck document.
//!
//! ```text
//!   GET /cards?name=<prefix> ──▶ catalog (immutable CardIndex, swapped on reload)
//!   GET /deck                ──▶ deck store (read file verbatim)
//!   POST /save               ──▶ deck store (temp file + atomic rename)
//! ```

pub mod catalog;
pub mod config;
pub mod deck;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use catalog::{CardIndex, Catalog};
pub use config::DeckServerConfig;
pub use deck::DeckStore;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
