use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};
use wormhole_core::StoreError;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to store url mapping: {0}")]
    Persistence(#[from] StoreError),
}

impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        match self {
            WorkerError::InvalidInput(message) => {
                warn!(reason = %message, "rejected shorten request");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            WorkerError::Persistence(source) => {
                error!(error = %source, "failed to persist mapping");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store URL mapping",
                )
                    .into_response()
            }
        }
    }
}
