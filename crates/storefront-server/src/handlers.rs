//! HTTP Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use storefront_core::{
    CheckoutBody, CheckoutResponse, CheckoutSessionRequest, Package, RedirectUrls,
    StorefrontError,
};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ClientConfigResponse {
    pub publishable_key: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.provider.is_some(),
    })
}

/// Published package list
pub async fn list_packages(State(state): State<AppState>) -> Json<Vec<Package>> {
    Json(state.catalog.packages().to_vec())
}

/// Client-safe Stripe configuration for Stripe.js
pub async fn client_config(
    State(state): State<AppState>,
) -> Result<Json<ClientConfigResponse>, ApiError> {
    let publishable_key = state
        .settings
        .publishable_key
        .clone()
        .ok_or(ApiError::NotConfigured("Stripe publishable key"))?;

    Ok(Json(ClientConfigResponse { publishable_key }))
}

/// Create a Stripe checkout session for the submitted package
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CheckoutBody>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Json(body) = body?;

    let pkg = body.validate(&state.catalog, state.settings.pricing)?;
    let urls = RedirectUrls::from_origin(&request_origin(&headers, &state)?)?;
    let request = CheckoutSessionRequest::for_package(&pkg, urls)?;

    let provider = state
        .provider
        .as_ref()
        .ok_or(ApiError::NotConfigured("Payments"))?;

    let session = provider.create_checkout_session(&request).await?;

    tracing::info!(
        session_id = %session.id,
        package = %pkg.name,
        group = %pkg.group,
        hosted_url = session.url.as_deref().unwrap_or("-"),
        "Checkout session created"
    );

    Ok(Json(CheckoutResponse { id: session.id }))
}

/// Any non-POST request to the checkout route
pub async fn checkout_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed",
    )
}

/// `Origin` header, else the configured site URL
fn request_origin(headers: &HeaderMap, state: &AppState) -> Result<String, StorefrontError> {
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .filter(|o| !o.trim().is_empty() && *o != "null")
        .map(str::to_string)
        .or_else(|| state.settings.site_url.clone())
        .ok_or(StorefrontError::MissingOrigin)
}
