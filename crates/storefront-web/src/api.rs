//! API Client

use async_trait::async_trait;
use serde::Deserialize;
use storefront_core::{CheckoutBody, ErrorBody, Package};
use thiserror::Error;

use crate::selection::CheckoutApi;

/// Shown when an error carries no text of its own
pub const FALLBACK_ERROR: &str = "Error during checkout";

/// Client-side checkout failures. All of them end up as one alert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Checkout API failed{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api { status: u16, message: Option<String> },

    /// Success status but no usable session id
    #[error("Checkout API returned no session id")]
    MissingSessionId,

    /// Stripe.js missing or not initialized
    #[error("Stripe failed to load")]
    StripeUnavailable,

    /// Stripe.js refused the redirect
    #[error("{0}")]
    Redirect(String),
}

impl CheckoutError {
    /// Text for the blocking notification
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR.into()
        } else {
            message
        }
    }
}

#[derive(Deserialize)]
struct SessionReply {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Deserialize)]
struct ClientConfig {
    publishable_key: String,
}

/// Talks to the storefront server over HTTP
#[derive(Clone, Debug)]
pub struct HttpCheckoutApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCheckoutApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Same origin as the current page
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".into());
        Self::new(origin)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Publishable key for Stripe.js
    pub async fn publishable_key(&self) -> Result<String, CheckoutError> {
        let response = self
            .client
            .get(self.url("/api/config"))
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CheckoutError::StripeUnavailable);
        }

        response
            .json::<ClientConfig>()
            .await
            .map(|c| c.publishable_key)
            .map_err(|_| CheckoutError::StripeUnavailable)
    }
}

#[async_trait(?Send)]
impl CheckoutApi for HttpCheckoutApi {
    async fn create_session(&self, pkg: &Package) -> Result<String, CheckoutError> {
        let response = self
            .client
            .post(self.url("/api/checkout"))
            .json(&CheckoutBody::for_package(pkg))
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.json::<ErrorBody>().await.ok().map(|b| b.error);
            return Err(CheckoutError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SessionReply>()
            .await
            .ok()
            .and_then(|reply| reply.id)
            .filter(|id| !id.is_empty())
            .ok_or(CheckoutError::MissingSessionId)
    }
}
