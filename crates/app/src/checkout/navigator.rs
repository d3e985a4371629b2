//! Navigation out of the checkout view.

use mockall::automock;

/// Moves the shopper to another view.
#[automock]
pub trait Navigator: Send + Sync {
    /// Show the view at `path`.
    fn navigate(&self, path: &str);
}
