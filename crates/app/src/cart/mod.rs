//! Cart

mod snapshot;
mod store;

pub use snapshot::CartSnapshot;
pub use store::CartStore;
