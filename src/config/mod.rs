//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DeckServerConfig (validated, immutable)
//!     → handed to HttpServer and the catalog/deck subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CatalogConfig, CorsConfig, DeckConfig, DeckServerConfig, LimitsConfig, ListenerConfig,
    ObservabilityConfig,
};
pub use validation::ValidationError;
