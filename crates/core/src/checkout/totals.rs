//! Checkout totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    checkout::shipping::{ShippingMethod, ShippingRates},
    prices::{TaxRate, round_currency},
};

/// Tax and shipping configuration for a checkout.
///
/// This is the only place the tax rate comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPricing {
    /// Sales tax applied to the subtotal.
    pub tax_rate: TaxRate,

    /// Cost of each shipping method.
    pub shipping_rates: ShippingRates,
}

impl CheckoutPricing {
    /// Pricing with the given tax rate and the default shipping table.
    pub fn new(tax_rate: TaxRate) -> Self {
        Self {
            tax_rate,
            shipping_rates: ShippingRates::default(),
        }
    }

    /// Replace the shipping table.
    #[must_use]
    pub fn with_shipping_rates(mut self, shipping_rates: ShippingRates) -> Self {
        self.shipping_rates = shipping_rates;
        self
    }
}

/// Derived checkout amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Tax on the subtotal, rounded to cents.
    pub tax: Decimal,

    /// Cost of the selected shipping method.
    pub shipping_cost: Decimal,

    /// Subtotal plus tax plus shipping, saturating at [`Decimal::MAX`].
    pub grand_total: Decimal,
}

impl CheckoutTotals {
    /// `grand_total = subtotal + tax + shipping_cost`, where tax is the
    /// configured fraction of the subtotal and shipping is looked up by
    /// method.
    pub fn compute(subtotal: Decimal, method: ShippingMethod, pricing: &CheckoutPricing) -> Self {
        let subtotal = round_currency(subtotal);
        let tax = pricing.tax_rate.tax_on(subtotal);
        let shipping_cost = pricing.shipping_rates.cost(method);

        Self {
            subtotal,
            tax,
            shipping_cost,
            grand_total: subtotal.saturating_add(tax).saturating_add(shipping_cost),
        }
    }
}
