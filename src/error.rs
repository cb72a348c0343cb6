//! Error types and handling for the property lookup service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;

use crate::store::StoreError;

/// Message returned when no record matches an exact lookup
pub const PROPERTY_NOT_FOUND: &str = "Property not found";

/// Application error types
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    NotFound(String),
    SourceUnavailable(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::SourceUnavailable(msg) => write!(f, "Property data unavailable: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Machine-readable error code for response bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::SourceUnavailable(_) => "source_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message without the category prefix
    pub fn detail(&self) -> &str {
        match self {
            AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::SourceUnavailable(msg)
            | AppError::Internal(msg) => msg,
        }
    }

    pub fn property_not_found() -> Self {
        AppError::NotFound(PROPERTY_NOT_FOUND.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.detail(),
            code: self.error_code(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Any failure to read the backing file makes the service unavailable
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::SourceUnavailable(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("record load task failed: {}", err))
    }
}

/// Validation functions
pub fn validate_identifier<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    let value = value.map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", name)));
    }

    Ok(value)
}

/// Normalize text using Unicode NFKC
pub fn normalize_text(text: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    text.nfkc().collect::<String>().trim().to_string()
}
