//! Handle for active change listeners.

use tokio::task::JoinHandle;

/// Active change subscription.
///
/// Dropping the handle stops the listeners.
#[derive(Debug)]
pub struct Subscription {
    listeners: Vec<JoinHandle<()>>,
}

impl Subscription {
    pub(super) const fn new(listeners: Vec<JoinHandle<()>>) -> Self {
        Self { listeners }
    }

    /// Stops the listeners.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}
