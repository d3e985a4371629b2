//! Config Errors

use rust_decimal::Decimal;
use storefront::checkout::ShippingMethodError;
use thiserror::Error;

/// Invalid client settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A shipping rate override was not written as `method=cost`.
    #[error("expected `method=cost`, got `{0}`")]
    MalformedRate(String),

    /// Unknown shipping method name.
    #[error(transparent)]
    Method(#[from] ShippingMethodError),

    /// Shipping cost is not a decimal.
    #[error("invalid shipping cost: {0}")]
    Cost(#[from] rust_decimal::Error),

    /// Shipping cost below zero.
    #[error("shipping cost {0} must not be negative")]
    NegativeCost(Decimal),

    /// Request timeout of zero seconds.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}
