//! Error types shared across the storefront
//!
//! Standardized error taxonomy used by every API surface.

use crate::response::ApiResponse;
use axum::http::{Response, StatusCode};
use thiserror::Error;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Resource not found (404)
    NotFound,
    /// Invalid request (400)
    Invalid,
    /// Too many requests (429)
    RateLimited,
    /// Internal server error (500)
    Internal,
    /// Storage error (500)
    Database,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Invalid => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::Invalid => "E0006",
            Self::RateLimited => "E0008",
            Self::Internal => "E9001",
            Self::Database => "E9002",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the storefront API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Invalid request
    #[error("Invalid request: {message}")]
    Invalid { message: String },

    /// Too many requests
    #[error("Too many requests")]
    RateLimited,

    /// Storage error
    #[error("Storage error: {message}")]
    Database { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    // ========== Convenient constructors ==========

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create an Invalid error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid { message: message.into() }
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database { message: message.into() }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    // ========== Error inspection methods ==========

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::Validation { .. } => ApiErrorCode::Validation,
            Self::NotFound { .. } => ApiErrorCode::NotFound,
            Self::Invalid { .. } => ApiErrorCode::Invalid,
            Self::RateLimited => ApiErrorCode::RateLimited,
            Self::Database { .. } => ApiErrorCode::Database,
            Self::Internal { .. } => ApiErrorCode::Internal,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::Invalid { message } => message.clone(),
            Self::RateLimited => "Too many requests, try again later".to_string(),
            Self::Database { message } => message.clone(),
            Self::Internal { message } => message.clone(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> Response<axum::body::Body> {
        let code = self.error_code();
        let status = code.status_code();
        let message = self.message();

        let body = ApiResponse::<()>::error(code.code(), message);
        let json_body = serde_json::to_string(&body).unwrap_or_default();

        Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(json_body.into())
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body("Internal error".into())
                    .unwrap()
            })
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
