use crate::observability::metrics::{ACCOUNT_LOCKS, LOCK_WAIT_LATENCY};
use dashmap::DashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// One mutex per key, created on first use and kept for the lifetime of the
/// registry.
///
/// Lookups and first-time inserts only contend on the map shard holding the
/// key, so unrelated keys do not serialize behind a single lock.
pub struct KeyLockRegistry<K> {
    locks: DashMap<K, Arc<Mutex<()>>>,
}

impl<K> KeyLockRegistry<K>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    pub fn new() -> Self {
        KeyLockRegistry {
            locks: DashMap::new(),
        }
    }

    /// The lock for `key`. Every caller asking for the same key gets the
    /// same instance, including callers racing on the very first request.
    pub fn lock_for(&self, key: &K) -> Arc<Mutex<()>> {
        // Fast path takes only a shard read lock
        let existing = self.locks.get(key).map(|lock| Arc::clone(lock.value()));
        if let Some(lock) = existing {
            return lock;
        }

        let lock = self.locks.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(key = %key, "Creating account lock");
            ACCOUNT_LOCKS.inc();
            Arc::new(Mutex::new(()))
        });
        Arc::clone(lock.value())
    }

    /// Run `critical_section` while holding the lock for `key`.
    ///
    /// The guard is dropped on every exit path of the closure, including
    /// early `Err` returns and unwinding panics.
    pub fn with_lock<R>(&self, key: &K, critical_section: impl FnOnce() -> R) -> R {
        let lock = self.lock_for(key);

        let wait_started = Instant::now();
        let _guard = acquire(&lock, key);
        LOCK_WAIT_LATENCY.observe(wait_started.elapsed().as_secs_f64());

        critical_section()
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl<K> Default for KeyLockRegistry<K>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    fn default() -> Self {
        Self::new()
    }
}

// A panic inside a critical section poisons the mutex. The stores are only
// written at the tail of the section, so the guarded state is still usable.
fn acquire<'a, K: fmt::Display>(lock: &'a Mutex<()>, key: &K) -> MutexGuard<'a, ()> {
    lock.lock().unwrap_or_else(|poisoned: PoisonError<MutexGuard<'a, ()>>| {
        tracing::warn!(key = %key, "Recovering poisoned account lock");
        poisoned.into_inner()
    })
}
