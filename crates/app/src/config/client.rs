//! Storefront client settings.

use std::{path::PathBuf, str::FromStr, time::Duration};

use clap::Args;
use rust_decimal::Decimal;
use storefront::{
    checkout::{CheckoutPricing, ShippingMethod, ShippingRates},
    prices::TaxRate,
};

use crate::config::ConfigError;

/// A shipping cost replacing the built-in rate of one method, written as
/// `method=cost` (e.g. `express=10.00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingRateOverride {
    /// Method whose rate is replaced.
    pub method: ShippingMethod,

    /// New cost, never negative.
    pub cost: Decimal,
}

impl FromStr for ShippingRateOverride {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (method, cost) = raw
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedRate(raw.to_string()))?;

        let method = method.trim().parse()?;
        let cost = Decimal::from_str_exact(cost.trim())?;

        if cost.is_sign_negative() {
            return Err(ConfigError::NegativeCost(cost));
        }

        Ok(Self { method, cost })
    }
}

/// Storefront API and device settings.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the storefront REST API
    #[arg(long, env = "STOREFRONT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token to store before running the command
    #[arg(
        long,
        env = "STOREFRONT_API_TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub api_token: Option<String>,

    /// Directory holding the persisted cart and token
    #[arg(
        long,
        env = "STOREFRONT_STORAGE_DIR",
        default_value = ".storefront",
        global = true
    )]
    pub storage_dir: PathBuf,

    /// Seconds to wait for each API request
    #[arg(
        long,
        env = "STOREFRONT_REQUEST_TIMEOUT_SECS",
        default_value_t = 15,
        global = true
    )]
    pub request_timeout_secs: u64,

    /// Sales tax as a fraction of the subtotal
    #[arg(
        long,
        env = "STOREFRONT_TAX_RATE",
        default_value = "0.08",
        global = true
    )]
    pub tax_rate: TaxRate,

    /// Shipping cost overrides, e.g. `express=10.00`
    #[arg(
        long = "shipping-rate",
        env = "STOREFRONT_SHIPPING_RATES",
        value_delimiter = ',',
        global = true
    )]
    pub shipping_rates: Vec<ShippingRateOverride>,
}

impl ClientConfig {
    /// Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Duration::from_secs(self.request_timeout_secs))
    }

    /// Tax and shipping prices for checkout.
    pub fn pricing(&self) -> CheckoutPricing {
        let mut rates = ShippingRates::default();

        for rate in &self.shipping_rates {
            rates = rates.with_rate(rate.method, rate.cost);
        }

        CheckoutPricing::new(self.tax_rate).with_shipping_rates(rates)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            api_url: Some("http://localhost:8000/api/".to_string()),
            api_token: None,
            storage_dir: PathBuf::from(".storefront"),
            request_timeout_secs: 15,
            tax_rate: TaxRate::new(Decimal::new(8, 2)).unwrap_or(TaxRate::ZERO),
            shipping_rates: Vec::new(),
        }
    }

    #[test]
    fn parses_rate_override() -> TestResult {
        let rate: ShippingRateOverride = " Express = 10.50 ".parse()?;

        assert_eq!(rate.method, ShippingMethod::Express);
        assert_eq!(rate.cost, Decimal::new(1050, 2));

        Ok(())
    }

    #[test]
    fn rejects_malformed_overrides() {
        assert!(matches!(
            "express".parse::<ShippingRateOverride>(),
            Err(ConfigError::MalformedRate(_))
        ));
        assert!(matches!(
            "teleport=1.00".parse::<ShippingRateOverride>(),
            Err(ConfigError::Method(_))
        ));
        assert!(matches!(
            "express=-1".parse::<ShippingRateOverride>(),
            Err(ConfigError::NegativeCost(_))
        ));
        assert!(matches!(
            "express=cheap".parse::<ShippingRateOverride>(),
            Err(ConfigError::Cost(_))
        ));
    }

    #[test]
    fn overrides_replace_only_their_method() -> TestResult {
        let mut config = config();
        config.shipping_rates = vec!["overnight=30".parse()?];

        let pricing = config.pricing();

        assert_eq!(
            pricing.shipping_rates.cost(ShippingMethod::Overnight),
            Decimal::new(30, 0)
        );
        assert_eq!(
            pricing.shipping_rates.cost(ShippingMethod::Standard),
            Decimal::new(599, 2)
        );
        assert_eq!(pricing.tax_rate.fraction(), Decimal::new(8, 2));

        Ok(())
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = config();
        config.request_timeout_secs = 0;

        assert!(matches!(
            config.request_timeout(),
            Err(ConfigError::ZeroTimeout)
        ));
    }
}
