//! Checkout errors

use thiserror::Error;

use crate::checkout::{forms::ValidationError, step::CheckoutStep};

/// Errors raised by checkout step transitions and order preparation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Required input is missing on the current step.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The wizard is already on its last step.
    #[error("checkout is already on the review step")]
    AlreadyAtReview,

    /// Orders can only be placed from the review step.
    #[error("orders can only be placed from the review step, not {0}")]
    NotAtReview(CheckoutStep),

    /// There is nothing in the cart to order.
    #[error("your cart is empty")]
    EmptyCart,
}
