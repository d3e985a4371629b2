//! Persisted cart snapshot.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use storefront::cart::Cart;

/// The cart as written to device storage between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// The cart as it was last known.
    pub cart: Cart,

    /// When the snapshot was taken.
    pub saved_at: Timestamp,
}

impl CartSnapshot {
    /// Snapshot `cart` as of now.
    pub fn now(cart: Cart) -> Self {
        Self {
            cart,
            saved_at: Timestamp::now(),
        }
    }
}
