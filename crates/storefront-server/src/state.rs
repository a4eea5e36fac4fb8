//! Application State

use std::sync::Arc;

use storefront_core::{Catalog, PricingMode};
use storefront_payments::PaymentProvider;

/// Per-request checkout settings derived from configuration
#[derive(Clone, Debug, Default)]
pub struct CheckoutSettings {
    /// Where charged prices come from
    pub pricing: PricingMode,

    /// Origin for redirect URLs when the request has no `Origin` header
    pub site_url: Option<String>,

    /// Stripe publishable key served to the page
    pub publishable_key: Option<String>,
}

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Payment provider (None if Stripe is not configured)
    pub provider: Option<Arc<dyn PaymentProvider>>,

    /// Package price list
    pub catalog: Arc<Catalog>,

    /// Checkout settings
    pub settings: Arc<CheckoutSettings>,
}
