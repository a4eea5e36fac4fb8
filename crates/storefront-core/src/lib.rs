//! # storefront-core
//!
//! Catalog, pricing and the checkout request/response contract shared by
//! the storefront server and the WASM page.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐  { pkg }   ┌──────────────────┐  session request  ┌──────────┐
//! │  Storefront  │──────────▶│ POST /api/checkout│─────────────────▶│  Stripe  │
//! │  page (WASM) │◀──────────│   (validation)    │◀─────────────────│          │
//! └──────────────┘  { id }    └──────────────────┘    session id     └──────────┘
//! ```
//!
//! This crate does no I/O. It owns the rules both sides must agree on:
//! which packages exist, how a price becomes cents, and what a valid
//! request looks like.

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod pricing;

pub use catalog::{Catalog, EDITING_MINIMUM_NOTE, Group, Package};
pub use checkout::{
    CheckoutBody, CheckoutResponse, CheckoutSessionRequest, ErrorBody, PackagePayload,
    PricingMode, RedirectUrls,
};
pub use error::{Result, StorefrontError};
pub use pricing::{chargeable_minor_units, to_minor_units};
