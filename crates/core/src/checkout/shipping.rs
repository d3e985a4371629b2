//! Shipping methods and rates

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Ground delivery.
    #[default]
    Standard,

    /// Two-day delivery.
    Express,

    /// Next-day delivery.
    Overnight,
}

impl ShippingMethod {
    /// All methods, cheapest first.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::Overnight];

    /// Wire identifier, as sent in the order payload.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Overnight => "overnight",
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard Shipping",
            Self::Express => "Express Shipping",
            Self::Overnight => "Overnight Shipping",
        }
    }

    const fn default_cost(self) -> Decimal {
        match self {
            Self::Standard => Decimal::from_parts(599, 0, 0, false, 2),
            Self::Express => Decimal::from_parts(1299, 0, 0, false, 2),
            Self::Overnight => Decimal::from_parts(2499, 0, 0, false, 2),
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unknown shipping method identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shipping method `{0}` (expected standard, express or overnight)")]
pub struct ShippingMethodError(pub String);

impl FromStr for ShippingMethod {
    type Err = ShippingMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        Self::ALL
            .into_iter()
            .find(|method| method.id().eq_ignore_ascii_case(value))
            .ok_or_else(|| ShippingMethodError(value.to_string()))
    }
}

/// Cost of each shipping method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingRates {
    rates: FxHashMap<ShippingMethod, Decimal>,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            rates: ShippingMethod::ALL
                .into_iter()
                .map(|method| (method, method.default_cost()))
                .collect(),
        }
    }
}

impl ShippingRates {
    /// Override the cost of one method.
    #[must_use]
    pub fn with_rate(mut self, method: ShippingMethod, cost: Decimal) -> Self {
        self.rates.insert(method, cost);
        self
    }

    /// Cost of `method`.
    pub fn cost(&self, method: ShippingMethod) -> Decimal {
        self.rates
            .get(&method)
            .copied()
            .unwrap_or_else(|| method.default_cost())
    }
}
