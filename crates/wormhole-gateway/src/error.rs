use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};
use wormhole_core::StoreError;
use wormhole_dispatcher::DispatchError;

pub type Result<T> = std::result::Result<T, FrontendError>;

/// Every way a public request can fail, each mapped to one HTTP status.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// Missing or empty input from the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The worker node could not be reached or answered badly.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
    /// The worker stored a different code than the one handed to the client.
    #[error("node stored code '{stored}' but '{expected}' was expected")]
    CodeMismatch { expected: String, stored: String },
    /// The store failed; distinct from a missing mapping.
    #[error("store failure: {0}")]
    Persistence(#[from] StoreError),
    #[error("no mapping for short code '{0}'")]
    NotFound(String),
}

impl IntoResponse for FrontendError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            FrontendError::InvalidInput(message) => {
                warn!(reason = %message, "rejected request");
                (StatusCode::BAD_REQUEST, message.clone())
            }
            FrontendError::Dispatch(source) => {
                error!(error = %source, "failed to dispatch shorten request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process request".to_string(),
                )
            }
            FrontendError::CodeMismatch { .. } => {
                error!(error = %self, "worker returned an unexpected code");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process request".to_string(),
                )
            }
            FrontendError::Persistence(source) => {
                error!(error = %source, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to access URL mappings".to_string(),
                )
            }
            FrontendError::NotFound(code) => {
                warn!(code = %code, "short code not found");
                (
                    StatusCode::NOT_FOUND,
                    "Shortened URL not found".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
