//! Page Components

mod storefront;

pub use storefront::StorefrontPage;
