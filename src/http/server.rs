//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, CORS, metrics)
//! - Start the catalog load and optional watcher
//! - Serve until the shutdown signal fires

use std::path::PathBuf;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, MatchedPath},
    http::{HeaderValue, Method, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::{spawn_initial_load, Catalog, CatalogWatcher};
use crate::config::{CorsConfig, DeckServerConfig};
use crate::deck::DeckStore;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub deck: DeckStore,
}

impl AppState {
    pub fn new(catalog: Catalog, deck: DeckStore) -> Self {
        Self { catalog, deck }
    }
}

/// HTTP server for the deck builder backend.
pub struct HttpServer {
    router: Router,
    config: DeckServerConfig,
    catalog: Catalog,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The catalog starts empty and not ready; [`HttpServer::run`] loads it.
    pub fn new(config: DeckServerConfig) -> Self {
        let catalog = Catalog::new();
        let deck = DeckStore::new(&config.deck.path);
        let state = AppState::new(catalog.clone(), deck);

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            catalog,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &DeckServerConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/cards", get(handlers::search_cards))
            .route("/deck", get(handlers::load_deck))
            .route("/save", post(handlers::save_deck))
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.limits.request_timeout_secs,
            )));

        if let Some(cors) = cors_layer(&config.cors) {
            router = router.layer(cors);
        }

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id(req.headers()),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let catalog_path = PathBuf::from(&self.config.catalog.path);
        spawn_initial_load(self.catalog.clone(), catalog_path.clone());

        // Dropping the watcher stops it, so hold it until the server exits.
        let _watcher = if self.config.catalog.watch {
            match CatalogWatcher::new(&catalog_path, self.catalog.clone()).run() {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to start catalog watcher");
                    None
                }
            }
        } else {
            None
        };

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DeckServerConfig {
        &self.config
    }

    /// Handle to the catalog served by this instance.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    let origin = config.allowed_origin.as_deref()?;
    match HeaderValue::from_str(origin) {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list([origin]))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(AllowHeaders::mirror_request()),
        ),
        Err(e) => {
            tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
            None
        }
    }
}

async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    metrics::record_request(method.as_str(), &route, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardIndex;
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router_with(dir: &tempfile::TempDir, catalog: Catalog) -> Router {
        let config = DeckServerConfig::default();
        let state = AppState::new(catalog, DeckStore::new(dir.path().join("deck.json")));
        HttpServer::build_router(&config, state)
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_cards_route() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::with_index(CardIndex::from_names([
            "Dragon", "Dragonling", "Drake", "Dragoon", "Dream", "Drag",
        ]));
        let app = router_with(&dir, catalog);

        let response = app
            .oneshot(Request::get("/cards?name=DRAG").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let names: Vec<String> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(names, vec!["Dragon", "Dragonling", "Dragoon", "Drag"]);
    }

    #[tokio::test]
    async fn test_cards_without_name_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with(&dir, Catalog::with_index(CardIndex::from_names(["Opt"])));

        for uri in ["/cards", "/cards?name="] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_bytes(response).await, b"[]");
        }
    }

    #[tokio::test]
    async fn test_save_ignores_content_type_and_deck_returns_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with(&dir, Catalog::with_index(CardIndex::empty()));

        let save = app
            .clone()
            .oneshot(
                Request::post("/save")
                    .header(header::CONTENT_TYPE, "text/plain")
                    .body(Body::from(r#"{"a": 2, "b": 3}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(save.status(), StatusCode::OK);
        assert!(body_bytes(save).await.is_empty());

        let deck = app
            .oneshot(Request::get("/deck").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(deck.status(), StatusCode::OK);
        assert_eq!(body_bytes(deck).await, br#"{"a":2,"b":3}"#);
    }

    #[tokio::test]
    async fn test_deck_before_save_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with(&dir, Catalog::with_index(CardIndex::empty()));

        let response = app
            .oneshot(Request::get("/deck").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_save_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with(&dir, Catalog::with_index(CardIndex::empty()));

        let response = app
            .oneshot(Request::post("/save").body(Body::from("{oops")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!dir.path().join("deck.json").exists());
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with(&dir, Catalog::with_index(CardIndex::empty()));

        let generated = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(generated.headers().contains_key("x-request-id"));

        let supplied = app
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(supplied.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_cors_allows_only_configured_origin() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with(&dir, Catalog::with_index(CardIndex::empty()));

        let allowed = app
            .clone()
            .oneshot(
                Request::get("/cards?name=x")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8080"
        );

        let other = app
            .oneshot(
                Request::get("/cards?name=x")
                    .header(header::ORIGIN, "http://evil.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(!other
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_health_reports_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let app = router_with(&dir, Catalog::with_index(CardIndex::from_names(["Opt", "Ponder"])));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["catalog_ready"], json!(true));
        assert_eq!(body["cards"], json!(2));
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = DeckServerConfig::default();
        config.limits.max_body_bytes = 16;
        let state = AppState::new(
            Catalog::with_index(CardIndex::empty()),
            DeckStore::new(dir.path().join("deck.json")),
        );
        let app = HttpServer::build_router(&config, state);

        let response = app
            .oneshot(
                Request::post("/save")
                    .body(Body::from(r#"{"cards": ["Forest", "Forest", "Forest"]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
