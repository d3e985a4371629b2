//! Test support shared by the unit tests.

mod fake;
mod fixtures;

pub use fake::FakeStorefront;
pub use fixtures::*;
