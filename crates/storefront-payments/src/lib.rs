//! # storefront-payments
//!
//! Payment provider integration for the reel storefront.
//!
//! ## Stripe Checkout (Hosted)
//!
//! **Flow:** Storefront page → session endpoint → Stripe hosted page → back
//! to the storefront with `?success=1` or `?canceled=1`.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  Storefront │────▶│  Stripe Hosted  │────▶│  Storefront │
//! │  (packages) │     │  Checkout Page  │     │  (banner)   │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! The card form never touches this system; the server only creates the
//! session and returns its id.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::{sync::Arc, time::Duration};
//! use storefront_payments::{PaymentProvider, StripeClient, TimeoutProvider};
//!
//! let stripe = Arc::new(StripeClient::new(&secret_key));
//! let provider = TimeoutProvider::new(stripe, Duration::from_secs(10));
//!
//! let session = provider.create_checkout_session(&request).await?;
//! // Return session.id to the page, which calls Stripe.js redirectToCheckout
//! ```

mod checkout;
mod error;
mod mock;
mod provider;

pub use checkout::StripeClient;
pub use error::{FALLBACK_MESSAGE, PaymentError, Result};
pub use mock::MockProvider;
pub use provider::{CheckoutSession, PaymentProvider, TimeoutProvider};
