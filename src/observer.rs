//! Fan-out notification: the mechanic behind Observer.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

pub trait Subscriber<P: ?Sized>: Send + Sync {
    fn update(&self, payload: &P);

    fn name(&self) -> &str {
        "subscriber"
    }
}

/// An insertion-ordered set of subscribers, compared by identity.
///
/// All methods take `&self`, so a subscriber holding a handle to its subject
/// may attach or detach while a notification is being delivered. `notify`
/// delivers to a snapshot taken before the first delivery, so such changes
/// only apply from the next call.
pub struct Subject<P: ?Sized> {
    subscribers: Mutex<Vec<Arc<dyn Subscriber<P>>>>,
}

impl<P: ?Sized> Default for Subject<P> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

fn same_subscriber<P: ?Sized>(a: &Arc<dyn Subscriber<P>>, b: &Arc<dyn Subscriber<P>>) -> bool {
    // Thin pointers only: vtable addresses are not a stable identity.
    Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
}

impl<P: ?Sized> Subject<P> {
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<Arc<dyn Subscriber<P>>>> {
        // The list is only ever pushed to or removed from whole; a panic
        // elsewhere cannot leave it half-updated.
        self.subscribers.lock().unwrap_or_else(|poisoned| {
            warn!("subscriber list lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Adds `subscriber` unless it is already attached. Returns whether it was added.
    pub fn attach(&self, subscriber: Arc<dyn Subscriber<P>>) -> bool {
        let mut subscribers = self.subscribers();
        if subscribers.iter().any(|s| same_subscriber(s, &subscriber)) {
            debug!(subscriber = subscriber.name(), "already attached");
            return false;
        }
        debug!(subscriber = subscriber.name(), "attached");
        subscribers.push(subscriber);
        true
    }

    /// Removes `subscriber`. Detaching a non-member is a no-op returning `false`.
    pub fn detach(&self, subscriber: &Arc<dyn Subscriber<P>>) -> bool {
        let mut subscribers = self.subscribers();
        match subscribers.iter().position(|s| same_subscriber(s, subscriber)) {
            Some(index) => {
                subscribers.remove(index);
                debug!(subscriber = subscriber.name(), "detached");
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self, subscriber: &Arc<dyn Subscriber<P>>) -> bool {
        self.subscribers()
            .iter()
            .any(|s| same_subscriber(s, subscriber))
    }

    /// Delivers `payload` to every subscriber in attachment order and returns
    /// how many were notified. Blocks until the last subscriber returns.
    pub fn notify(&self, payload: &P) -> usize {
        let snapshot: Vec<_> = self.subscribers().clone();
        debug!(subscribers = snapshot.len(), "notifying");
        for subscriber in &snapshot {
            subscriber.update(payload);
        }
        snapshot.len()
    }

    pub fn len(&self) -> usize {
        self.subscribers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers().is_empty()
    }
}
