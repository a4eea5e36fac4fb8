//! Checkout Contract
//!
//! Wire types exchanged between the storefront page and the session
//! endpoint, plus the provider-neutral session request built from a
//! validated package.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Group, Package};
use crate::error::{Result, StorefrontError};
use crate::pricing::chargeable_minor_units;

/// Fixed checkout currency (ISO 4217, lowercase as payment APIs expect)
pub const CURRENCY: &str = "usd";

/// Query marker appended to the site root after a completed payment
pub const SUCCESS_MARKER: &str = "success=1";

/// Query marker appended to the site root after an abandoned checkout
pub const CANCELED_MARKER: &str = "canceled=1";

/// Package as submitted by the client. Every field is optional on the wire
/// so that missing fields surface as validation errors, not parse errors.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PackagePayload {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, with = "json_number")]
    pub price: Option<Decimal>,

    #[serde(default)]
    pub group: Option<Group>,
}

/// Prices travel as JSON numbers only; `"600"` is a parse error.
mod json_number {
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float_option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|n| Decimal::try_from(n).map_err(D::Error::custom))
            .transpose()
    }
}

impl From<&Package> for PackagePayload {
    fn from(pkg: &Package) -> Self {
        Self {
            name: Some(pkg.name.clone()),
            price: Some(pkg.price),
            group: Some(pkg.group),
        }
    }
}

/// `POST /api/checkout` body
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckoutBody {
    #[serde(default)]
    pub pkg: Option<PackagePayload>,
}

impl CheckoutBody {
    pub fn for_package(pkg: &Package) -> Self {
        Self {
            pkg: Some(PackagePayload::from(pkg)),
        }
    }
}

/// Successful endpoint response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    /// Provider session identifier
    pub id: String,
}

/// Error envelope returned by every failing JSON endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Where the charged price comes from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// Resolve the package in the catalog and charge the catalog price
    #[default]
    Catalog,

    /// Charge whatever price the client submitted
    Client,
}

impl std::str::FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "catalog" => Ok(Self::Catalog),
            "client" => Ok(Self::Client),
            other => Err(format!("unknown pricing mode '{other}' (expected catalog or client)")),
        }
    }
}

impl PackagePayload {
    /// Validate the payload into a package that is safe to charge.
    ///
    /// In [`PricingMode::Catalog`] the returned package is the catalog entry
    /// and a submitted price must equal the catalog price.
    pub fn validate(&self, catalog: &Catalog, mode: PricingMode) -> Result<Package> {
        let name = self
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .ok_or(StorefrontError::MissingName)?;

        let price = self.price.ok_or(StorefrontError::MissingPrice)?;
        chargeable_minor_units(price)?;

        match mode {
            PricingMode::Client => Ok(Package {
                name: name.to_string(),
                price,
                group: self.group.unwrap_or(Group::FullService),
            }),
            PricingMode::Catalog => {
                let entry = catalog.find(name.trim(), self.group)?;
                if entry.price != price {
                    return Err(StorefrontError::PriceMismatch {
                        name: entry.name.clone(),
                        expected: entry.price,
                        submitted: price,
                    });
                }
                Ok(entry.clone())
            }
        }
    }
}

impl CheckoutBody {
    /// Validate the request body; see [`PackagePayload::validate`]
    pub fn validate(&self, catalog: &Catalog, mode: PricingMode) -> Result<Package> {
        self.pkg
            .as_ref()
            .ok_or(StorefrontError::MissingPackage)?
            .validate(catalog, mode)
    }
}

/// Post-checkout landing pages
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl RedirectUrls {
    /// Site root of `origin` with the success/cancel markers.
    pub fn from_origin(origin: &str) -> Result<Self> {
        let origin = origin.trim().trim_end_matches('/');
        if origin.is_empty() || origin.eq_ignore_ascii_case("null") {
            return Err(StorefrontError::MissingOrigin);
        }

        Ok(Self {
            success_url: format!("{origin}/?{SUCCESS_MARKER}"),
            cancel_url: format!("{origin}/?{CANCELED_MARKER}"),
        })
    }
}

/// Provider-neutral description of a one-time payment session with a
/// single line item
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckoutSessionRequest {
    pub currency: &'static str,

    /// Product label shown on the hosted page
    pub product_name: String,

    /// Price in cents
    pub unit_amount: i64,

    pub quantity: u64,

    #[serde(flatten)]
    pub urls: RedirectUrls,
}

impl CheckoutSessionRequest {
    pub fn for_package(pkg: &Package, urls: RedirectUrls) -> Result<Self> {
        let unit_amount = chargeable_minor_units(pkg.price)?;

        tracing::debug!(
            package = %pkg.name,
            group = %pkg.group,
            unit_amount,
            "Built checkout session request"
        );

        Ok(Self {
            currency: CURRENCY,
            product_name: pkg.name.clone(),
            unit_amount,
            quantity: 1,
            urls,
        })
    }
}
