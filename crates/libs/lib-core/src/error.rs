//! # Centralized Error Handling
//!
//! Application-wide error type [`AppError`], shared by the core library and the
//! web layer.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx)
//!    - [`Config`](AppError::Config) → 500
//!    - [`Database`](AppError::Database) → 500
//!    - [`Migration`](AppError::Migration) → 500
//!    - [`Template`](AppError::Template) → 500
//!    - [`Internal`](AppError::Internal) → 500
//!
//! Handlers return `Result<T>`; the [`IntoResponse`] impl logs the full
//! message server-side and answers with the status code and the user-facing
//! message, tagged with an [`ErrorDetail`] extension.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be selected or is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection or query failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Migration source or execution failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Template rendering failure.
    #[error("Template error: {0}")]
    Template(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Template(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-facing message.
    ///
    /// Server errors get a generic message so internals stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            _ => "An internal error occurred".to_string(),
        }
    }
}

/// Message attached to error responses for the web layer to render.
///
/// The body of an [`AppError`] response is the plain-text message; the web
/// layer swaps it for an HTML page when this extension is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let message = self.user_message();
        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorDetail { message });
        response
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => AppError::Database(db_err.message().to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Migration(err.to_string())
    }
}

// region: --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Template("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Config("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Database("table users is locked".into());
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = AppError::NotFound("No route for /nope".into());
        assert_eq!(err.user_message(), "No route for /nope");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_into_response_carries_detail() {
        let res = AppError::Internal("pool exhausted".into()).into_response();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            res.extensions().get::<ErrorDetail>(),
            Some(&ErrorDetail {
                message: "An internal error occurred".to_string()
            })
        );
    }
}
// endregion: --- Tests
