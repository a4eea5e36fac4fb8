//! Error Types

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Validation and pricing errors.
///
/// Every variant is a client mistake: the request can be rejected before
/// the payment provider is ever contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorefrontError {
    /// Body had no `pkg` object
    #[error("Missing package")]
    MissingPackage,

    /// Package name absent or blank
    #[error("Package name is required")]
    MissingName,

    /// Package price absent
    #[error("Package price is required")]
    MissingPrice,

    /// Price below zero
    #[error("Package price must not be negative: {0}")]
    NegativePrice(Decimal),

    /// Price rounds to zero minor units
    #[error("Package price is too small to charge: {0}")]
    PriceTooSmall(Decimal),

    /// Price does not fit into minor units
    #[error("Package price is too large: {0}")]
    PriceOverflow(Decimal),

    /// Name/group pair not present in the catalog
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    /// Name exists in more than one group and no group was given
    #[error("Package '{0}' exists in several groups; a group is required")]
    AmbiguousPackage(String),

    /// Submitted price disagrees with the catalog
    #[error("Price for '{name}' does not match the catalog (expected {expected}, got {submitted})")]
    PriceMismatch {
        name: String,
        expected: Decimal,
        submitted: Decimal,
    },

    /// Neither an `Origin` header nor a configured site URL
    #[error("Cannot determine site origin for redirect URLs")]
    MissingOrigin,
}
