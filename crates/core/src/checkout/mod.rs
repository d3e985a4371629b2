//! Checkout
//!
//! The checkout is a linear three step flow (shipping, payment, review)
//! gated by per-step validation, ending in a single order submission.

pub mod errors;
pub mod forms;
pub mod order;
pub mod session;
pub mod shipping;
pub mod step;
pub mod totals;

pub use errors::CheckoutError;
pub use forms::{PaymentInfo, ShippingAddress, ValidationError};
pub use order::{CreatedOrder, OrderLine, OrderRequest, PaymentMethodTag, PaymentSummary};
pub use session::CheckoutSession;
pub use shipping::{ShippingMethod, ShippingMethodError, ShippingRates};
pub use step::CheckoutStep;
pub use totals::{CheckoutPricing, CheckoutTotals};
