//! Stripe Checkout Integration
//!
//! Implements the "Stripe Checkout (Hosted)" approach: the server creates a
//! session, the page hands its id to Stripe.js, Stripe hosts the card form.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use storefront_core::CheckoutSessionRequest;
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData,
    CreateCheckoutSessionPaymentMethodTypes, Currency, StripeError,
};

use crate::error::{PaymentError, Result};
use crate::provider::{CheckoutSession, PaymentProvider};

/// Stripe client wrapper
pub struct StripeClient {
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client from the secret API key
    pub fn new(secret_key: &SecretString) -> Self {
        Self {
            client: Client::new(secret_key.expose_secret()),
        }
    }
}

fn currency(code: &str) -> Result<Currency> {
    match code {
        "usd" => Ok(Currency::USD),
        other => Err(PaymentError::InvalidRequest(format!("unsupported currency: {other}"))),
    }
}

/// Keep Stripe's own message when it sent one; transport errors keep their
/// display text.
fn map_stripe_error(err: StripeError) -> PaymentError {
    match err {
        StripeError::Stripe(request_error) => {
            PaymentError::Provider(request_error.message.unwrap_or_default())
        }
        other => PaymentError::Provider(other.to_string()),
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    /// Create a one-time-payment Checkout session with a single line item
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession> {
        let mut params = CreateCheckoutSession::new();
        params.success_url = Some(&request.urls.success_url);
        params.cancel_url = Some(&request.urls.cancel_url);
        params.mode = Some(CheckoutSessionMode::Payment);
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);

        params.line_items = Some(vec![CreateCheckoutSessionLineItems {
            quantity: Some(request.quantity),
            price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                currency: currency(request.currency)?,
                unit_amount: Some(request.unit_amount),
                product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                    name: request.product_name.clone(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]);

        let session = StripeCheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| {
                let err = map_stripe_error(e);
                tracing::error!(error = %err, product = %request.product_name, "Stripe rejected checkout session");
                err
            })?;

        tracing::info!(
            session_id = %session.id,
            product = %request.product_name,
            unit_amount = request.unit_amount,
            "Created Stripe checkout session"
        );

        Ok(CheckoutSession {
            id: session.id.to_string(),
            url: session.url,
        })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}
