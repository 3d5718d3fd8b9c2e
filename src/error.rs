use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application error taxonomy.
///
/// - [`AppError::Validation`] - malformed input, surfaced as 400; never
///   reaches the orchestrator
/// - [`AppError::Lookup`] - trip store failure wrapping the underlying
///   cause, surfaced as 500; not retried
/// - [`AppError::Internal`] - anything else, surfaced as 500
///
/// A cache miss is not an error anywhere in this crate; the cache contract
/// distinguishes absence with a typed `Option` outcome.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Lookup { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn lookup(message: impl Into<String>, details: Value) -> Self {
        Self::Lookup {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::Lookup { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "lookup_failed",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a sqlx failure to a lookup error carrying the underlying cause.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    tracing::error!(error = %e, "trip store query failed");
    AppError::lookup("Trip store query failed", json!({ "cause": e.to_string() }))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}
