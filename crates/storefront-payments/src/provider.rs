//! Payment Provider Abstraction
//!
//! The session endpoint only needs one provider operation: create a
//! one-time-payment checkout session. Keeping it behind a trait lets the
//! server run against Stripe in production and a scripted mock in tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storefront_core::CheckoutSessionRequest;

use crate::error::{PaymentError, Result};

/// Session returned by the provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Opaque session identifier, redeemable by the client-side library
    pub id: String,

    /// Hosted page URL, when the provider returns one
    #[serde(default)]
    pub url: Option<String>,
}

/// Payment provider trait (Strategy pattern)
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session for a single line item
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession>;

    /// Provider name for logs and health output
    fn name(&self) -> &str;
}

/// Bounds every call of the wrapped provider by a deadline.
pub struct TimeoutProvider {
    inner: Arc<dyn PaymentProvider>,
    timeout: Duration,
}

impl TimeoutProvider {
    pub fn new(inner: Arc<dyn PaymentProvider>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PaymentProvider for TimeoutProvider {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession> {
        tokio::time::timeout(self.timeout, self.inner.create_checkout_session(request))
            .await
            .map_err(|_| {
                tracing::warn!(
                    provider = self.inner.name(),
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "Checkout session creation timed out"
                );
                PaymentError::Timeout(self.timeout)
            })?
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
