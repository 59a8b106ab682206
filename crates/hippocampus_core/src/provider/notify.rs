//! Change notification channel.
//!
//! # Responsibility
//! - Broadcast "resource changed" signals after successful writes.
//!
//! # Invariants
//! - Notifying never blocks on observers.
//! - Observers whose receiver was dropped are pruned on the next notify.
//! - Signals carry the resource path only, never row data.

use crate::provider::resource::Resource;
use log::debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};

/// One "data changed" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChange {
    pub resource: Resource,
    pub uri: String,
}

impl ResourceChange {
    /// Whether an observer watching `watched` should refresh.
    ///
    /// Collection watchers refresh on every change; item watchers refresh on
    /// changes to their item and on collection-wide changes.
    pub fn affects(&self, watched: &Resource) -> bool {
        match (watched, &self.resource) {
            (Resource::Collection, _) => true,
            (Resource::Item(_), Resource::Collection) => true,
            (Resource::Item(watched_id), Resource::Item(changed_id)) => watched_id == changed_id,
        }
    }
}

/// Fan-out of change signals to any number of observers.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    observers: Mutex<Vec<Sender<ResourceChange>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Dropping the receiver unregisters it.
    pub fn subscribe(&self) -> Receiver<ResourceChange> {
        let (sender, receiver) = channel();
        self.lock_observers().push(sender);
        receiver
    }

    pub fn notify_change(&self, change: ResourceChange) {
        let mut observers = self.lock_observers();
        observers.retain(|observer| observer.send(change.clone()).is_ok());
        debug!(
            "event=change_notify module=provider resource={} observers={}",
            change.resource,
            observers.len()
        );
    }

    pub fn observer_count(&self) -> usize {
        self.lock_observers().len()
    }

    fn lock_observers(&self) -> MutexGuard<'_, Vec<Sender<ResourceChange>>> {
        // A panicking observer registration cannot leave the list half-written.
        self.observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
