//! User-facing notifications (toasts).

use mockall::automock;
use tracing::{info, warn};

/// Shows short success and error messages to the shopper.
#[automock]
pub trait Notifier: Send + Sync {
    /// Report a completed action.
    fn success(&self, message: &str);

    /// Report a failed action.
    fn error(&self, message: &str);
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "storefront::notify", "{message}");
    }

    fn error(&self, message: &str) {
        warn!(target: "storefront::notify", "{message}");
    }
}
