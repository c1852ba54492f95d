use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Serialize, de::DeserializeOwned};

use crate::storage::BlobStore;

type Observer<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Handle returned by [`Collection::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct State<T> {
    snapshot: Arc<Vec<T>>,
    observers: Vec<(Subscription, Observer<T>)>,
    next_subscription: u64,
}

/// In-memory authoritative copy of one stored collection.
///
/// Every change swaps in a whole new snapshot, writes it through to the
/// [`BlobStore`] and then hands the full snapshot to each observer. Observers
/// run after the internal lock is released, so they may call back into the
/// collection. Delivery order matches change order only while changes come
/// from a single thread.
pub struct Collection<T> {
    key: &'static str,
    store: BlobStore,
    state: Mutex<State<T>>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Loads `key` from the store; an unreadable collection starts empty.
    pub fn load(store: BlobStore, key: &'static str) -> Self {
        let records: Vec<T> = store.read(key);
        tracing::debug!("Loaded {} ({} records)", key, records.len());
        Self {
            key,
            store,
            state: Mutex::new(State {
                snapshot: Arc::new(records),
                observers: Vec::new(),
                next_subscription: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.lock().snapshot)
    }

    /// Registers `observer` and calls it right away with the current snapshot.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        let observer: Observer<T> = Arc::new(observer);
        let (subscription, snapshot) = {
            let mut state = self.lock();
            let subscription = Subscription(state.next_subscription);
            state.next_subscription += 1;
            state.observers.push((subscription, Arc::clone(&observer)));
            (subscription, Arc::clone(&state.snapshot))
        };

        observer(&snapshot);
        subscription
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut state = self.lock();
        let before = state.observers.len();
        state.observers.retain(|(s, _)| *s != subscription);
        state.observers.len() != before
    }

    pub fn replace(&self, records: Vec<T>) {
        self.modify(|current| *current = records);
    }

    /// Applies `f` to a copy of the latest snapshot, then swaps the copy in,
    /// persists it and publishes it.
    pub fn modify<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<T>) -> R,
    {
        self.commit(|records| (true, f(records)))
    }

    /// Like [`Collection::modify`], but `f` returning `None` leaves the
    /// snapshot untouched and nothing is persisted or published.
    pub fn update<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Vec<T>) -> Option<R>,
    {
        self.commit(|records| match f(records) {
            Some(result) => (true, Some(result)),
            None => (false, None),
        })
    }

    fn commit<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<T>) -> (bool, R),
    {
        let (result, snapshot, observers) = {
            let mut state = self.lock();
            let mut next = state.snapshot.as_ref().clone();
            let (changed, result) = f(&mut next);
            if !changed {
                return result;
            }

            // Persist while still holding the lock so stored order matches swap order.
            self.store.write(self.key, &next);
            state.snapshot = Arc::new(next);

            let observers: Vec<Observer<T>> =
                state.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            (result, Arc::clone(&state.snapshot), observers)
        };

        tracing::debug!(
            "Published {} snapshot ({} records) to {} observers",
            self.key,
            snapshot.len(),
            observers.len()
        );
        for observer in observers {
            observer(&snapshot);
        }

        result
    }
}
