//! Reel storefront HTTP server
//!
//! Axum-based server providing the checkout-session endpoint, the package
//! catalog, and the compiled WASM storefront page.

mod config;
mod error;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use storefront_core::Catalog;
use storefront_payments::{PaymentProvider, StripeClient, TimeoutProvider};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::state::{AppState, CheckoutSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Initialize payments
    let provider: Option<Arc<dyn PaymentProvider>> =
        config.stripe_secret_key.as_ref().map(|secret_key| {
            let stripe: Arc<dyn PaymentProvider> = Arc::new(StripeClient::new(secret_key));
            Arc::new(TimeoutProvider::new(stripe, config.checkout_timeout)) as Arc<dyn PaymentProvider>
        });

    if provider.is_some() {
        tracing::info!(timeout = ?config.checkout_timeout, "✓ Stripe configured");
    } else {
        tracing::warn!("⚠ Stripe not configured - payments disabled");
        tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
    }
    if config.stripe_publishable_key.is_none() {
        tracing::warn!("⚠ STRIPE_PUBLISHABLE_KEY not set - the page cannot load Stripe.js");
    }

    let catalog = Catalog::standard();
    tracing::info!(
        packages = catalog.packages().len(),
        pricing = ?config.pricing,
        "Catalog loaded"
    );

    let state = AppState {
        provider,
        catalog: Arc::new(catalog),
        settings: Arc::new(CheckoutSettings {
            pricing: config.pricing,
            site_url: config.site_url.clone(),
            publishable_key: config.stripe_publishable_key.clone(),
        }),
    };

    let app = routes::router(state, Some(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 storefront running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health        - Health check");
    tracing::info!("  GET  /api/packages  - Package catalog");
    tracing::info!("  GET  /api/config    - Stripe publishable key");
    tracing::info!("  POST /api/checkout  - Create Stripe checkout session");
    tracing::info!("  GET  /*             - Storefront page ({})", config.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
