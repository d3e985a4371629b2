//! Cart

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    ids::{CartId, CartItemId, ProductId, VariantId},
    items::{CartItem, CartItemKey},
};

/// Shopping cart: an ordered list of lines.
///
/// Totals are never stored; they are always derived from the lines so they
/// cannot disagree with them. Every way of building a cart goes through
/// normalisation, so a cart never holds a zero-quantity line or two lines
/// for the same (product, variant) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CartWire")]
pub struct Cart {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<CartId>,
    items: Vec<CartItem>,
}

/// Cart as it arrives over the wire; `items` is required so a bare cart
/// line is never mistaken for a cart.
#[derive(Deserialize)]
struct CartWire {
    #[serde(default)]
    id: Option<CartId>,
    items: Vec<CartItem>,
}

impl From<CartWire> for Cart {
    fn from(wire: CartWire) -> Self {
        Self::from_items(wire.id, wire.items)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw lines, merging duplicates and dropping empty lines.
    pub fn from_items(id: Option<CartId>, items: impl IntoIterator<Item = CartItem>) -> Self {
        Self {
            id,
            items: normalize(items),
        }
    }

    /// Remote cart identifier, when the server assigned one.
    pub fn id(&self) -> Option<&CartId> {
        self.id.as_ref()
    }

    /// Cart lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line totals across all lines.
    ///
    /// Prices come from the server, so the sum saturates at
    /// [`Decimal::MAX`] instead of overflowing.
    pub fn total_amount(&self) -> Decimal {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Look up a line by its identifier.
    pub fn item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Look up the line holding `product` / `variant`.
    pub fn find(&self, product: &ProductId, variant: Option<&VariantId>) -> Option<&CartItem> {
        self.items.iter().find(|item| item.is_for(product, variant))
    }

    /// Whether any line holds `product` / `variant`.
    pub fn contains(&self, product: &ProductId, variant: Option<&VariantId>) -> bool {
        self.find(product, variant).is_some()
    }

    /// Write an authoritative line into the cart.
    ///
    /// The line replaces the existing line with the same id, or failing that
    /// the line with the same (product, variant) key; otherwise it is
    /// appended. A zero quantity removes the line.
    pub fn upsert_item(&mut self, item: CartItem) {
        if item.quantity == 0 {
            self.remove_item(&item.id);

            return;
        }

        let position = self
            .items
            .iter()
            .position(|existing| existing.id == item.id)
            .or_else(|| {
                self.items.iter().position(|existing| {
                    existing.is_for(&item.product_id, item.variant_id.as_ref())
                })
            });

        match position.and_then(|index| self.items.get_mut(index)) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }

        // Replacing by id can move a line onto another line's key.
        self.items = normalize(std::mem::take(&mut self.items));
    }

    /// Remove the line with `id`, returning it if it was present.
    pub fn remove_item(&mut self, id: &CartItemId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == *id)?;

        Some(self.items.remove(index))
    }
}

fn normalize(items: impl IntoIterator<Item = CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::new();
    let mut positions: FxHashMap<CartItemKey, usize> = FxHashMap::default();

    for item in items {
        if item.quantity == 0 {
            continue;
        }

        match positions.get(&item.key()).and_then(|&index| merged.get_mut(index)) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => {
                positions.insert(item.key(), merged.len());
                merged.push(item);
            }
        }
    }

    merged
}
