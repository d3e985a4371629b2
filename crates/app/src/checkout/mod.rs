//! Checkout wizard.

mod errors;
mod navigator;
mod wizard;

pub use errors::PlaceOrderError;
pub use navigator::*;
pub use wizard::CheckoutWizard;
