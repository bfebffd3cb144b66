//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the deck
//! server. Every section defaults to the values the service has always run
//! with, so an absent config file behaves exactly like an empty one.

use serde::{Deserialize, Serialize};

/// Root configuration for the deck server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeckServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Card catalog source.
    pub catalog: CatalogConfig,

    /// Persisted deck file.
    pub deck: DeckConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Card catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the JSON card dataset, relative to the working directory.
    pub path: String,

    /// Reload the catalog when the dataset file changes on disk.
    pub watch: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "./server/AllCards.json".to_string(),
            watch: false,
        }
    }
}

/// Deck persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Path to the single deck document.
    pub path: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            path: "./server/deck.json".to_string(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The only origin allowed to make cross-origin requests.
    /// `None` disables CORS handling entirely.
    pub allowed_origin: Option<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: Some("http://localhost:8080".to_string()),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}
