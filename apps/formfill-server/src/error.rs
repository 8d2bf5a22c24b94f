//! Error types for the formfill server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use pdftk_engine::EngineError;

/// Server error types
///
/// The unsupported-name and bad-body cases respond 500 with fixed message
/// text; existing clients match on those exact strings.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Not supported PDF name")]
    UnsupportedTemplate(String),

    #[error("Error in JSON body.")]
    InvalidBody,

    #[error("Toolkit error: {0}")]
    Toolkit(#[from] EngineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::UnsupportedTemplate(name) => {
                tracing::warn!("Rejected unknown template '{}'", name);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UNSUPPORTED_PDF_NAME",
                    "Not supported PDF name".to_string(),
                )
            }
            ServerError::InvalidBody => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_JSON_BODY",
                "Error in JSON body.".to_string(),
            ),
            ServerError::Toolkit(err) => {
                tracing::error!("Toolkit failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TOOLKIT_ERROR",
                    err.to_string(),
                )
            }
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
