//! User-facing error notifications.
//!
//! The store calls [`Notifier::notify_error`] exactly once per rejected
//! operation and never on success. Implementations decide how the message
//! reaches the shopper (toast, stderr, log line).

use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// Displays a short error message to the shopper.
pub trait Notifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Writes notifications to the log. Default for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        warn!(target: "kart::notify", "{}", message);
    }
}

/// Records every message; used to assert notification behavior.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn last(&self) -> Option<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify_error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
