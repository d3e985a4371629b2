//! Prelude

pub use crate::{
    cart::Cart,
    checkout::{
        CheckoutError, CheckoutPricing, CheckoutSession, CheckoutStep, CheckoutTotals,
        CreatedOrder, OrderRequest, PaymentInfo, ShippingAddress, ShippingMethod, ShippingRates,
        ValidationError,
    },
    ids::{CartId, CartItemId, OrderId, ProductId, TypedId, VariantId},
    items::{CartItem, CartItemKey, ProductRef, VariantRef},
    prices::{TaxRate, TaxRateError, round_currency},
};
