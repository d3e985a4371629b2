//! Storefront
//!
//! Client-side cart and checkout model for the storefront: typed identifiers,
//! the cart line invariants, the checkout step machine and the order payload
//! sent to the remote API. Nothing in this crate performs I/O.

pub mod cart;
pub mod checkout;
pub mod ids;
pub mod items;
pub mod prelude;
pub mod prices;
