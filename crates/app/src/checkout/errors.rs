//! Checkout Errors

use storefront::checkout::CheckoutError;
use thiserror::Error;

use crate::api::ApiError;

/// Why an order was not placed.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The order could not be assembled; nothing was sent.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The server rejected the order or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),
}
