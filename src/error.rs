// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::{DataLoadError, NoFacilitiesError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The nursery sheet could not be loaded; no map can be shown.
    #[error("Error loading data: {0}")]
    DataUnavailable(#[from] DataLoadError),

    #[error(transparent)]
    NoFacilities(#[from] NoFacilitiesError),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::DataUnavailable(err) => {
                tracing::error!(error = %err, "Nursery records unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "data_unavailable",
                    Some(self.to_string()),
                )
            }
            AppError::NoFacilities(_) => (
                StatusCode::NOT_FOUND,
                "no_facilities",
                Some(self.to_string()),
            ),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
