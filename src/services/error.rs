//! Error handling utilities for route handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors as seen by clients. Every variant renders as a plain-text body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Unavailable(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for logging errors and converting to an [`AppError`]
pub trait LogErr<T> {
    /// Log error with context and return a 500 whose body is just `context`
    fn log_500(self, context: &str) -> AppResult<T>;

    /// Log error and return a 500 whose body is `context: cause`
    fn log_500_with_cause(self, context: &str) -> AppResult<T>;
}

impl<T, E: std::fmt::Display> LogErr<T> for Result<T, E> {
    fn log_500(self, context: &str) -> AppResult<T> {
        self.map_err(|e| {
            tracing::error!(error = %e, "{}", context);
            AppError::Internal(context.to_string())
        })
    }

    fn log_500_with_cause(self, context: &str) -> AppResult<T> {
        self.map_err(|e| {
            tracing::error!(error = %e, "{}", context);
            AppError::Internal(format!("{}: {}", context, e))
        })
    }
}
