//! Keyed mutex registry
//!
//! Hands out an exclusive guard per identifier. Mutexes are created lazily on
//! first use. The table only keeps weak references: once every guard for an
//! id is dropped and nobody is waiting on it, the entry is dead and gets
//! pruned the next time the table grows past its threshold.
//!
//! Guards are not re-entrant. An operation acquires one guard per namespace
//! and holds it for its whole body.

use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Weak};

/// Default number of tracked entries before dead ones are swept.
pub const DEFAULT_PRUNE_THRESHOLD: usize = 1024;

/// Exclusive access to one key of a [`LockTable`], released on drop.
pub struct LockGuard {
    _guard: ArcMutexGuard<RawMutex, ()>,
}

pub struct LockTable<K> {
    entries: Mutex<HashMap<K, Weak<Mutex<()>>>>,
    prune_threshold: usize,
}

impl<K> LockTable<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_prune_threshold(DEFAULT_PRUNE_THRESHOLD)
    }

    pub fn with_prune_threshold(prune_threshold: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            prune_threshold: prune_threshold.max(1),
        }
    }

    /// Block until the mutex for `id` is acquired.
    pub fn lock(&self, id: &K) -> LockGuard {
        let mutex = self.mutex_for(id);
        LockGuard {
            _guard: Mutex::lock_arc(&mutex),
        }
    }

    /// Acquire the mutex for `id` if nobody holds it.
    pub fn try_lock(&self, id: &K) -> Option<LockGuard> {
        let mutex = self.mutex_for(id);
        Mutex::try_lock_arc(&mutex).map(|guard| LockGuard { _guard: guard })
    }

    /// Number of tracked entries, live or not yet pruned.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry whose mutex is no longer referenced.
    pub fn prune(&self) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, weak| weak.strong_count() > 0);
        before - entries.len()
    }

    fn mutex_for(&self, id: &K) -> Arc<Mutex<()>> {
        let mut entries = self.entries.lock();
        if let Some(mutex) = entries.get(id).and_then(Weak::upgrade) {
            return mutex;
        }

        if entries.len() >= self.prune_threshold {
            let before = entries.len();
            entries.retain(|_, weak| weak.strong_count() > 0);
            log::debug!("Pruned {} idle lock entries", before - entries.len());
        }

        let mutex = Arc::new(Mutex::new(()));
        entries.insert(id.clone(), Arc::downgrade(&mutex));
        mutex
    }
}

impl<K> Default for LockTable<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
