//! Console notifier: shopper-facing messages on stderr.

use kart_store::Notifier;

/// Prints notifications to stderr, keeping stdout for JSON output.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_error(&self, message: &str) {
        eprintln!("✖ {}", message);
    }
}
