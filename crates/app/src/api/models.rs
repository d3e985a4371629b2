//! Request and response bodies.

use serde::{Deserialize, Serialize};
use storefront::{
    cart::Cart,
    ids::{ProductId, VariantId},
    items::CartItem,
};

/// Body of `POST /cart/add/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCartRequest {
    /// Product to add.
    pub product_id: ProductId,

    /// Chosen variant, omitted for products without variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,

    /// Units to add, at least 1.
    pub quantity: u32,
}

/// Body of `PUT /cart/items/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateQuantityRequest {
    /// New quantity for the line.
    pub quantity: u32,
}

/// What a cart-mutating call answers with: the whole cart or just the
/// affected line. Either replaces local state; nothing is merged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CartMutation {
    /// The full authoritative cart.
    Cart(Cart),

    /// The line that was written.
    Item(CartItem),
}
