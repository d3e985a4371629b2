//! Items

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::{CartItemId, ProductId, VariantId};

/// A product as presented to the shopper when adding it to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    /// Product identifier.
    pub id: ProductId,

    /// Display name used in notifications.
    pub name: String,
}

impl ProductRef {
    /// Creates a product reference.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A product variant (size, colour, ...) as presented to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRef {
    /// Variant identifier.
    pub id: VariantId,

    /// Display name used in notifications.
    pub name: String,
}

impl VariantRef {
    /// Creates a variant reference.
    pub fn new(id: impl Into<VariantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Human readable label for a product and optional variant,
/// e.g. `T-Shirt (Large)`.
pub fn display_name(product: &ProductRef, variant: Option<&VariantRef>) -> String {
    match variant {
        Some(variant) => format!("{} ({})", product.name, variant.name),
        None => product.name.clone(),
    }
}

/// The identity of a purchasable unit: a product and optional variant.
///
/// A cart holds at most one line per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartItemKey {
    /// Product identifier.
    pub product_id: ProductId,

    /// Variant identifier, when the product has variants.
    pub variant_id: Option<VariantId>,
}

impl CartItemKey {
    /// Whether this key identifies `product` / `variant`.
    pub fn matches(&self, product: &ProductId, variant: Option<&VariantId>) -> bool {
        self.product_id == *product && self.variant_id.as_ref() == variant
    }
}

/// A single cart line as returned by the cart API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart line identifier.
    pub id: CartItemId,

    /// Product identifier.
    pub product_id: ProductId,

    /// Variant identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,

    /// Number of units, at least 1 for any line held in a cart.
    pub quantity: u32,

    /// Unit price captured by the server when the line was written.
    pub price: Decimal,

    /// Product name, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// Variant name, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
}

impl CartItem {
    /// The (product, variant) key of this line.
    pub fn key(&self) -> CartItemKey {
        CartItemKey {
            product_id: self.product_id.clone(),
            variant_id: self.variant_id.clone(),
        }
    }

    /// Whether this line holds `product` / `variant`.
    pub fn is_for(&self, product: &ProductId, variant: Option<&VariantId>) -> bool {
        self.product_id == *product && self.variant_id.as_ref() == variant
    }

    /// Unit price multiplied by quantity, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

impl fmt::Display for CartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .product_name
            .as_deref()
            .unwrap_or_else(|| self.product_id.as_str());

        match &self.variant_name {
            Some(variant) => write!(f, "{name} ({variant}) x{}", self.quantity),
            None => write!(f, "{name} x{}", self.quantity),
        }
    }
}
