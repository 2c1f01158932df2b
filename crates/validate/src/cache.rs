//! Checksum-keyed result cache with a fixed time-to-live.

use crate::result::ValidationResult;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a cached result stays valid.
pub const RESULT_TTL: Duration = Duration::from_secs(5 * 60);

struct Entry {
    stored_at: Instant,
    result: ValidationResult,
}

/// Mutex-guarded map from cache key to a timestamped result. Expired entries
/// are evicted lazily on lookup; [`ValidationCache::purge_expired`] sweeps
/// the rest.
#[derive(Default)]
pub struct ValidationCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl ValidationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<ValidationResult> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < RESULT_TTL => Some(entry.result.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, result: ValidationResult) {
        self.entries.lock().insert(
            key,
            Entry {
                stored_at: Instant::now(),
                result,
            },
        );
    }

    /// Drop every entry past its TTL.
    pub fn purge_expired(&self) {
        self.entries
            .lock()
            .retain(|_, entry| entry.stored_at.elapsed() < RESULT_TTL);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
