//! API error handling.
//!
//! Handlers return `Result<T, ApiError>`; the error renders as a status
//! code plus a `{ "error": "..." }` body.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storefront_core::{ErrorBody, StorefrontError};
use storefront_payments::PaymentError;
use thiserror::Error;

/// Error type for storefront API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not JSON of the expected shape
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    /// Package failed validation
    #[error(transparent)]
    Validation(#[from] StorefrontError),

    /// Provider call failed
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// A required integration is not configured
    #[error("{0} not configured")]
    NotConfigured(&'static str),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Payment(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Text for the `error` field
    fn message(&self) -> String {
        match self {
            Self::Payment(err) => err.provider_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ErrorBody::new(self.message()))).into_response()
    }
}
