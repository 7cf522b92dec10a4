//! HTTP error type and the `{"error": ...}` payload every failure carries.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::CatalogError;

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human readable message
    pub error: String,
}

/// Errors returned by the catalog API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request was invalid
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Internal error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidCategory(_) => Self::BadRequest(err.to_string()),
            other => {
                error!("Catalog operation failed: {}", other);
                Self::Internal("Internal server error during data processing.".to_string())
            }
        }
    }
}
