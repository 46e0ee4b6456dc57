//! Unified error handling
//!
//! Application-level error type and response envelope:
//! - [`AppError`] - application error enum, maps to HTTP via `IntoResponse`
//! - [`AppResponse`] - API response structure
//!
//! All settlement/quota validation errors are raised before any persistent
//! mutation (or abort the enclosing transaction) and reach the client as
//! typed failures with a stable code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API response envelope
///
/// ```json
/// {
///   "code": "0000",
///   "message": "success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (0000 = success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> AppResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: "0000".to_string(),
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (4xx) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: i64,
        requested: i64,
        available: i64,
    },

    #[error("You have reached the monthly limit ({limit}) for the {plan} plan")]
    QuotaExceeded { limit: i64, plan: String },

    #[error("Product '{product}' does not belong to company '{company}'")]
    ProductCompanyMismatch { product: String, company: String },

    #[error("This order does not belong to you")]
    OrderNotOwned,

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        tracing::warn!(target: "security", error = %msg, "Invalid token");
        AppError::InvalidToken
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E3001"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "E3003"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "E3002"),

            // Authorization errors (403)
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "E2001"),
            AppError::OrderNotOwned => (StatusCode::FORBIDDEN, "E2002"),

            // Not found (404)
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "E0003"),

            // Conflict (409)
            AppError::Conflict(_) => (StatusCode::CONFLICT, "E0004"),

            // Validation (400)
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "E0002"),
            AppError::EmptyOrder => (StatusCode::BAD_REQUEST, "E0006"),
            AppError::ProductCompanyMismatch { .. } => (StatusCode::BAD_REQUEST, "E0007"),

            // Business rules (422)
            AppError::InsufficientStock { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "E0008"),
            AppError::QuotaExceeded { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "E0009"),

            // System errors (500)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9001")
            }
        };

        let message = match &self {
            // Don't leak internals to clients
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
