use storefront_app::{checkout::Navigator, notify::Notifier};
use tracing::{info, warn};

/// Prints notifications for the shopper.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        info!(target: "storefront::notify", "{message}");
        println!("{message}");
    }

    fn error(&self, message: &str) {
        warn!(target: "storefront::notify", "{message}");
        eprintln!("error: {message}");
    }
}

/// Prints the view a browser would be sent to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        println!("-> {path}");
    }
}
