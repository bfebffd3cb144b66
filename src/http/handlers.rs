//! Route handlers.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::error::AppError;
use crate::http::request::request_id;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct CardQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub catalog_ready: bool,
    pub cards: usize,
}

/// `GET /cards?name=<prefix>`: up to five matching card names.
pub async fn search_cards(
    State(state): State<AppState>,
    Query(query): Query<CardQuery>,
) -> Json<Vec<String>> {
    let results = state.catalog.search(query.name.as_deref()).await;
    tracing::debug!(prefix = ?query.name, matches = results.len(), "Card search");
    Json(results)
}

/// `GET /deck`: the persisted deck file, verbatim.
pub async fn load_deck(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let bytes = state.deck.load().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], bytes))
}

/// `POST /save`: replace the persisted deck with the request body.
///
/// The body is parsed as JSON whatever its declared content type; an empty
/// body is treated as `{}`.
pub async fn save_deck(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let document = parse_document(&body)?;
    tracing::info!(request_id = %request_id(&headers), deck = %document, "Saving deck");

    state.deck.save(&document).await?;
    Ok(StatusCode::OK)
}

/// `GET /health`: liveness plus catalog readiness.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        catalog_ready: state.catalog.is_ready(),
        cards: state.catalog.snapshot().len(),
    })
}

fn parse_document(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    Ok(serde_json::from_slice(body)?)
}
