//! Unified error handling with Sentry integration.
//!
//! Provides a unified `ApiError` type that captures unexpected errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, ApiError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use tamarind_core::DomainError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain operation was rejected by the gateway.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed request input (unparsable category, status, ...).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// Stable machine-readable error code.
    code: &'static str,
    /// Human-readable message.
    error: String,
}

impl ApiError {
    /// Stable code for the client; the message text is not a contract.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Domain(err) => match err {
                DomainError::OutOfStock { .. } => "out_of_stock",
                DomainError::NotInCart(_) => "not_in_cart",
                DomainError::EmptyCart => "empty_cart",
                DomainError::NotFound(_) => "not_found",
                DomainError::Unauthorized(_) => "unauthorized",
                DomainError::Validation(_) => "validation",
            },
            Self::BadRequest(_) => "bad_request",
            Self::Internal(_) => "internal",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Domain(err) => match err {
                DomainError::OutOfStock { .. } | DomainError::EmptyCart => StatusCode::CONFLICT,
                DomainError::NotInCart(_) | DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Unauthorized(_) => StatusCode::FORBIDDEN,
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Domain rejections are normal operation; only faults go to Sentry.
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                code: self.code(),
                error: message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
