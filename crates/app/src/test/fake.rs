//! In-memory storefront backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use storefront::{
    cart::Cart,
    checkout::{CreatedOrder, OrderRequest},
    ids::{CartItemId, ProductId},
    items::CartItem,
};

use crate::api::{AddToCartRequest, ApiError, CartMutation, StorefrontApi};

const DEFAULT_PRICE_CENTS: i64 = 1000;

#[derive(Debug, Default)]
struct State {
    items: Vec<CartItem>,
    prices: FxHashMap<ProductId, Decimal>,
    next_id: u64,
    orders: Vec<OrderRequest>,
}

/// Behaves like the real backend: merges lines per (product, variant),
/// assigns line ids and remembers placed orders.
#[derive(Debug, Default)]
pub struct FakeStorefront {
    state: Mutex<State>,
    whole_cart: bool,
}

impl FakeStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a line.
    #[must_use]
    pub fn with_item(self, item: CartItem) -> Self {
        {
            let mut state = self.state();

            if let Ok(id) = item.id.as_str().parse::<u64>() {
                state.next_id = state.next_id.max(id);
            }

            state.items.push(item);
        }

        self
    }

    /// Set a unit price in cents.
    #[must_use]
    pub fn with_price(self, product: &str, cents: i64) -> Self {
        self.state()
            .prices
            .insert(product.into(), Decimal::new(cents, 2));

        self
    }

    /// Answer mutations with the whole cart instead of the written line.
    #[must_use]
    pub fn responding_with_cart(mut self) -> Self {
        self.whole_cart = true;
        self
    }

    /// Orders received so far.
    pub fn orders(&self) -> Vec<OrderRequest> {
        self.state().orders.clone()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond(&self, state: &State, item: CartItem) -> CartMutation {
        if self.whole_cart {
            CartMutation::Cart(Cart::from_items(Some("c1".into()), state.items.clone()))
        } else {
            CartMutation::Item(item)
        }
    }
}

#[async_trait]
impl StorefrontApi for FakeStorefront {
    async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        Ok(Cart::from_items(
            Some("c1".into()),
            self.state().items.clone(),
        ))
    }

    async fn add_to_cart(&self, request: AddToCartRequest) -> Result<CartMutation, ApiError> {
        let mut state = self.state();

        let existing = state
            .items
            .iter()
            .position(|line| line.is_for(&request.product_id, request.variant_id.as_ref()));

        let item = match existing.and_then(|index| state.items.get_mut(index)) {
            Some(line) => {
                line.quantity += request.quantity;
                line.clone()
            }
            None => {
                state.next_id += 1;

                let price = state
                    .prices
                    .get(&request.product_id)
                    .copied()
                    .unwrap_or(Decimal::new(DEFAULT_PRICE_CENTS, 2));

                let line = CartItem {
                    id: state.next_id.to_string().into(),
                    product_id: request.product_id,
                    variant_id: request.variant_id,
                    quantity: request.quantity,
                    price,
                    product_name: None,
                    variant_name: None,
                };

                state.items.push(line.clone());
                line
            }
        };

        Ok(self.respond(&state, item))
    }

    async fn update_item(&self, item: CartItemId, quantity: u32) -> Result<CartMutation, ApiError> {
        let mut state = self.state();

        let line = state
            .items
            .iter_mut()
            .find(|line| line.id == item)
            .ok_or(ApiError::NotFound)?;

        line.quantity = quantity;
        let line = line.clone();

        Ok(self.respond(&state, line))
    }

    async fn remove_item(&self, item: CartItemId) -> Result<(), ApiError> {
        let mut state = self.state();
        let before = state.items.len();

        state.items.retain(|line| line.id != item);

        if state.items.len() == before {
            return Err(ApiError::NotFound);
        }

        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), ApiError> {
        self.state().items.clear();

        Ok(())
    }

    async fn create_order(&self, order: OrderRequest) -> Result<CreatedOrder, ApiError> {
        let mut state = self.state();

        state.orders.push(order);

        Ok(CreatedOrder {
            id: format!("ord_{}", state.orders.len()).into(),
            order_number: None,
            status: Some("pending".to_string()),
        })
    }
}
