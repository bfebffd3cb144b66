//! HTTP façade.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and echoed back)
//!     → handlers.rs
//!         GET  /cards  → Catalog::search
//!         GET  /deck   → DeckStore::load
//!         POST /save   → DeckStore::save
//!         GET  /health → catalog readiness
//!     → error.rs (AppError → status code)
//! ```
//!
//! Requests are independent; the only shared mutable state is the deck file.

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::AppError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
