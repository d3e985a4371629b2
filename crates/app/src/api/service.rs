//! Storefront API service.

use async_trait::async_trait;
use mockall::automock;
use storefront::{
    cart::Cart,
    checkout::{CreatedOrder, OrderRequest},
    ids::CartItemId,
};

use crate::api::{AddToCartRequest, ApiError, CartMutation};

/// The storefront REST endpoints the cart and checkout rely on.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /cart/`: the shopper's current cart.
    async fn fetch_cart(&self) -> Result<Cart, ApiError>;

    /// `POST /cart/add/`: add a new line.
    async fn add_to_cart(&self, request: AddToCartRequest) -> Result<CartMutation, ApiError>;

    /// `PUT /cart/items/{id}/`: set a line's quantity.
    async fn update_item(&self, item: CartItemId, quantity: u32)
    -> Result<CartMutation, ApiError>;

    /// `DELETE /cart/items/{id}/`: drop a line.
    async fn remove_item(&self, item: CartItemId) -> Result<(), ApiError>;

    /// `POST /cart/clear/`: empty the cart.
    async fn clear_cart(&self) -> Result<(), ApiError>;

    /// `POST /orders/`: place an order.
    async fn create_order(&self, order: OrderRequest) -> Result<CreatedOrder, ApiError>;
}
