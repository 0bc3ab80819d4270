use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;

/// Which relay a failure came from. Decides the message the client sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relay {
    Fonts,
    Generate,
    Random,
}

impl Relay {
    /// The only failure text ever returned to clients for this relay.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Relay::Fonts => "Failed to fetch fonts",
            Relay::Generate => "Failed to generate ASCII art",
            Relay::Random => "Failed to generate random ASCII art",
        }
    }
}

impl fmt::Display for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Relay::Fonts => "fonts",
            Relay::Generate => "generate",
            Relay::Random => "random",
        };
        f.write_str(name)
    }
}

/// Gateway error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{relay} relay: backend unavailable: {source}")]
    BackendUnavailable {
        relay: Relay,
        #[source]
        source: BackendError,
    },

    #[error("{relay} relay: request body is not JSON: {source}")]
    InvalidBody {
        relay: Relay,
        #[source]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn backend(relay: Relay) -> impl FnOnce(BackendError) -> AppError {
        move |source| AppError::BackendUnavailable { relay, source }
    }

    pub fn relay(&self) -> Relay {
        match self {
            AppError::BackendUnavailable { relay, .. } | AppError::InvalidBody { relay, .. } => {
                *relay
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Details stay in the log; the client only ever sees the relay's fixed message.
        match &self {
            AppError::BackendUnavailable { .. } => tracing::error!("{self}"),
            AppError::InvalidBody { .. } => tracing::warn!("{self}"),
        }

        let body = Json(json!({ "error": self.relay().failure_message() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
