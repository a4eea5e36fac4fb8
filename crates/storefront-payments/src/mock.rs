//! Mock Payment Provider
//!
//! Scripted provider for tests and local demos. Records every request it
//! receives so callers can assert on call counts and line items.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use storefront_core::CheckoutSessionRequest;

use crate::error::{PaymentError, Result};
use crate::provider::{CheckoutSession, PaymentProvider};

/// Mock provider with a fixed outcome
pub struct MockProvider {
    outcome: std::result::Result<String, PaymentError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CheckoutSessionRequest>>,
}

impl MockProvider {
    /// Always returns a session with `session_id`
    pub fn succeeding(session_id: impl Into<String>) -> Self {
        Self::with_outcome(Ok(session_id.into()))
    }

    /// Always fails with `error`
    pub fn failing(error: PaymentError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: std::result::Result<String, PaymentError>) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering (for timeout tests)
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of session creations attempted
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<CheckoutSessionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PaymentProvider for MockProvider {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome.clone().map(|id| CheckoutSession {
            url: Some(format!("https://checkout.stripe.com/c/pay/{id}")),
            id,
        })
    }

    fn name(&self) -> &str {
        "MockProvider"
    }
}
