//! Mapping of handler failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::deck::DeckError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed JSON body: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Deck(#[from] DeckError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Deck(DeckError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Deck(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        let body = match &self {
            AppError::Deck(DeckError::NotFound(_)) => "No deck has been saved".to_string(),
            AppError::Deck(_) => "Deck storage error".to_string(),
            AppError::MalformedPayload(_) => self.to_string(),
        };
        (status, body).into_response()
    }
}
