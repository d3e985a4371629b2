//! Storefront REST API

mod client;
mod errors;
mod guard;
mod models;
mod service;

pub use client::HttpStorefrontApi;
pub use errors::ApiError;
pub use guard::{RequestScope, guarded};
pub use models::{AddToCartRequest, CartMutation, UpdateQuantityRequest};
pub use service::*;
