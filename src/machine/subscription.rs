//! RAII handle for a subscriber registration.

use std::sync::{Mutex, Weak};

use crate::machine::app_machine::{lock, Inner};

/// Keeps a subscriber registered for as long as it is alive.
///
/// Dropping the handle removes the subscriber; no further transitions are
/// delivered after that. Holds only a weak reference to the machine, so an
/// outstanding subscription never keeps a dead machine alive.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    inner: Weak<Mutex<Inner>>,
    id: u64,
}

impl Subscription {
    pub(super) fn new(inner: Weak<Mutex<Inner>>, id: u64) -> Self {
        Self { inner, id }
    }

    /// Explicitly end the subscription. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).subscribers.remove(&self.id);
        }
    }
}
