//! Storefront client runtime: API client, device storage, cart store and
//! checkout wizard.

pub mod api;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod context;
pub mod notify;
pub mod observability;
pub mod render;
pub mod storage;

mod busy;

#[cfg(test)]
mod test;
