//! Reel storefront web frontend
//!
//! Leptos-based WASM page: pick one package, get sent to Stripe Checkout.
//!
//! The checkout flow itself ([`selection::run_checkout`]) is plain async
//! Rust over two traits, so it runs and is tested without a browser.

mod app;
mod components;
mod pages;
mod stripe_js;

pub mod api;
pub mod selection;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
