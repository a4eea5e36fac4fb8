//! Payment Error Types

use std::time::Duration;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Message used when the provider gives no usable reason
pub const FALLBACK_MESSAGE: &str = "Stripe error";

/// Payment-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Provider rejected the call or could not be reached.
    /// Carries the provider's message verbatim (possibly empty).
    #[error("Stripe error: {0}")]
    Provider(String),

    /// Provider did not answer in time
    #[error("payment provider timed out after {0:?}")]
    Timeout(Duration),

    /// Request could not be expressed to the provider
    #[error("Invalid payment request: {0}")]
    InvalidRequest(String),
}

impl PaymentError {
    /// Message safe to hand back to the storefront page.
    ///
    /// Provider messages pass through untouched; a blank one becomes
    /// [`FALLBACK_MESSAGE`].
    pub fn provider_message(&self) -> String {
        match self {
            Self::Provider(msg) if !msg.trim().is_empty() => msg.clone(),
            Self::Provider(_) => FALLBACK_MESSAGE.into(),
            Self::Timeout(_) => "payment provider timed out".into(),
            Self::InvalidRequest(msg) => msg.clone(),
        }
    }
}
