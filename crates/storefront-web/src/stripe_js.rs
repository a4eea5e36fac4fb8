//! Stripe.js bridge
//!
//! Stripe.js is loaded by a `<script>` tag in `index.html`. The publishable
//! key is fetched from the server so it never has to be compiled in.

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::api::{CheckoutError, HttpCheckoutApi};
use crate::selection::Redirector;

#[wasm_bindgen]
extern "C" {
    /// The object returned by the global `Stripe(publishableKey)`
    type StripeJs;

    #[wasm_bindgen(js_name = Stripe, catch)]
    fn init_stripe(publishable_key: &str) -> Result<StripeJs, JsValue>;

    #[wasm_bindgen(method, js_name = redirectToCheckout)]
    fn redirect_to_checkout(this: &StripeJs, options: &JsValue) -> js_sys::Promise;
}

/// `error.message` of a Stripe.js result, if any
fn stripe_error_message(result: &JsValue) -> Option<String> {
    let error = js_sys::Reflect::get(result, &JsValue::from_str("error")).ok()?;
    if error.is_undefined() || error.is_null() {
        return None;
    }
    Some(
        js_sys::Reflect::get(&error, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_default(),
    )
}

/// Redirects with Stripe.js `redirectToCheckout({ sessionId })`
pub struct StripeJsRedirector {
    api: HttpCheckoutApi,
}

impl StripeJsRedirector {
    pub const fn new(api: HttpCheckoutApi) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl Redirector for StripeJsRedirector {
    async fn redirect_to_checkout(&self, session_id: &str) -> Result<(), CheckoutError> {
        let key = self.api.publishable_key().await?;
        let stripe = init_stripe(&key).map_err(|_| CheckoutError::StripeUnavailable)?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(
            &options,
            &JsValue::from_str("sessionId"),
            &JsValue::from_str(session_id),
        )
        .map_err(|_| CheckoutError::StripeUnavailable)?;

        let result = JsFuture::from(stripe.redirect_to_checkout(&options))
            .await
            .map_err(|e| CheckoutError::Redirect(e.as_string().unwrap_or_default()))?;

        match stripe_error_message(&result) {
            Some(message) => Err(CheckoutError::Redirect(message)),
            None => Ok(()),
        }
    }
}
