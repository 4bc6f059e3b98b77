//! Bounded memo of forward lookups.
//!
//! Insert-only until full, then silently drops new entries. There is no
//! eviction: the cache only ever holds values that are recomputable from the
//! calendar, so a miss is always safe.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Default number of cached forward lookups.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

#[derive(Debug)]
pub struct StepCache {
    capacity: usize,
    entries: Mutex<HashMap<u64, String>>,
}

impl Default for StepCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl StepCache {
    /// A capacity of 0 disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, step: u64) -> Option<String> {
        self.lock().get(&step).cloned()
    }

    /// Store `value` unless the cache is full. Returns whether it was stored.
    ///
    /// Overwriting an existing key is always allowed; concurrent writers for
    /// the same step write the same string.
    pub fn put(&self, step: u64, value: &str) -> bool {
        let mut entries = self.lock();
        if entries.len() >= self.capacity && !entries.contains_key(&step) {
            return false;
        }
        entries.insert(step, value.to_owned());
        true
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock only means another lookup panicked mid-insert; every
    // entry is still a correct rendering.
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
