//! Commit listeners.
//!
//! Listeners are kept in a handle registry keyed by id. Each notification pass
//! works on a snapshot of the registry, so a listener may unsubscribe itself
//! (or others) mid-pass without disturbing the pass in progress. A listener
//! that panics is isolated: the panic is caught and reported as a
//! [`MachineError::ListenerFault`].

use crate::core::{SessionData, Transaction};
use crate::error::{panic_message, MachineError};
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Identifier handed out per subscription.
pub type ListenerId = u64;

/// Callback invoked after every commit.
pub type Listener = Arc<dyn Fn(&SessionData, &Transaction) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: ListenerId,
    listeners: BTreeMap<ListenerId, Listener>,
}

/// Subscribed listeners, in subscription order.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `listener`. The returned handle unsubscribes it.
    pub fn add<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionData, &Transaction) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Arc::new(listener));

        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every listener subscribed when the pass starts.
    ///
    /// Returns one fault per listener that panicked.
    pub fn notify(&self, data: &SessionData, transaction: &Transaction) -> Vec<MachineError> {
        let snapshot: Vec<(ListenerId, Listener)> = lock(&self.inner)
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        snapshot
            .into_iter()
            .filter_map(|(id, listener)| {
                catch_unwind(AssertUnwindSafe(|| listener(data, transaction)))
                    .err()
                    .map(|panic| MachineError::ListenerFault {
                        listener: id,
                        message: panic_message(panic.as_ref()),
                    })
            })
            .collect()
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Disposer for a subscribed listener.
///
/// Dropping the handle keeps the listener subscribed; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Returns `false` if it was already gone or the
    /// machine no longer exists.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let removed = lock(&registry).listeners.remove(&self.id).is_some();
        removed
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
