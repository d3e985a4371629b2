//! Device Storage
//!
//! A small string key/value store that survives between sessions, used for
//! the cart snapshot and the bearer token.

mod errors;
mod file;
mod memory;

use async_trait::async_trait;
use mockall::automock;

pub use errors::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key under which the cart snapshot is kept.
pub const CART_KEY: &str = "cart";

/// Key under which the bearer token is kept.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Persistent key-value storage on the shopper's device.
#[automock]
#[async_trait]
pub trait DeviceStorage: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
