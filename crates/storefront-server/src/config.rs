//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `BIND_ADDR` - Listen address (default: 0.0.0.0:3000)
//! - `STRIPE_SECRET_KEY` - Stripe secret key; payments are disabled without it
//! - `STRIPE_PUBLISHABLE_KEY` - Client-safe key handed to Stripe.js
//! - `STOREFRONT_SITE_URL` - Origin used for redirect URLs when the request
//!   carries no `Origin` header
//! - `STOREFRONT_PRICING` - `catalog` (default) or `client`
//! - `CHECKOUT_TIMEOUT_SECS` - Provider call timeout (default: 10)
//! - `STOREFRONT_STATIC_DIR` - Frontend assets (default: static)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use storefront_core::PricingMode;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STATIC_DIR: &str = "static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Storefront server configuration.
///
/// `Debug` is derived; `SecretString` redacts itself.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub bind_addr: String,
    /// Stripe secret key (never sent to clients)
    pub stripe_secret_key: Option<SecretString>,
    /// Stripe publishable key for the page
    pub stripe_publishable_key: Option<String>,
    /// Fallback origin for success/cancel URLs
    pub site_url: Option<String>,
    /// Where charged prices come from
    pub pricing: PricingMode,
    /// Deadline for the provider call
    pub checkout_timeout: Duration,
    /// Directory with the compiled frontend
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let pricing = match get("STOREFRONT_PRICING") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_PRICING", e))?,
            None => PricingMode::default(),
        };

        let timeout_secs = match get("CHECKOUT_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidEnvVar(
                        "CHECKOUT_TIMEOUT_SECS",
                        "must be at least 1".into(),
                    ));
                }
                Ok(secs) => secs,
                Err(e) => return Err(ConfigError::InvalidEnvVar("CHECKOUT_TIMEOUT_SECS", e.to_string())),
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            stripe_secret_key: get("STRIPE_SECRET_KEY").map(SecretString::from),
            stripe_publishable_key: get("STRIPE_PUBLISHABLE_KEY"),
            site_url: get("STOREFRONT_SITE_URL"),
            pricing,
            checkout_timeout: Duration::from_secs(timeout_secs),
            static_dir: get("STOREFRONT_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.into())
                .into(),
        })
    }
}
