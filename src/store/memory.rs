//! In-process preference store with a write log.

use std::collections::HashMap;

use {parking_lot::RwLock, tracing::debug};

use crate::store::{PrefValue, PreferenceStore};

/// Preference store kept entirely in memory.
///
/// Every `put` is appended to a write log so callers can observe exactly
/// which writes reached the store and in what order.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    /// Current values by key.
    values: RwLock<HashMap<String, PrefValue>>,
    /// Every write in arrival order.
    writes: RwLock<Vec<(String, PrefValue)>>,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    ///
    /// Seeding does not count as writes.
    #[must_use]
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, PrefValue)>,
        K: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self {
            values: RwLock::new(values),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Returns a copy of the write log.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, PrefValue)> {
        self.writes.read().clone()
    }

    /// Returns the number of writes received for `key`.
    #[must_use]
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.read().iter().filter(|(k, _)| k == key).count()
    }

    /// Returns whether the store holds an entry for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: PrefValue) {
        debug!(key = key, value = %value, "Storing preference in memory");
        self.values.write().insert(key.to_string(), value.clone());
        self.writes.write().push((key.to_string(), value));
    }
}

#[cfg(test)]
mod tests {
    use crate::store::{MemoryPreferenceStore, PrefValue, PreferenceStore};

    #[test]
    fn test_write_log_records_every_put() {
        let store = MemoryPreferenceStore::new();
        store.put_int("A", 1);
        store.put_int("A", 1);
        store.put_string("B", "x");

        assert_eq!(store.write_count("A"), 2);
        assert_eq!(store.write_count("B"), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.writes().last(),
            Some(&("B".to_string(), PrefValue::Text("x".to_string())))
        );
    }

    #[test]
    fn test_seeded_entries_are_not_writes() {
        let store = MemoryPreferenceStore::with_entries([("A", PrefValue::Int(3))]);
        assert_eq!(store.get_int("A", 0), 3);
        assert!(store.writes().is_empty());
        assert!(store.contains("A"));
        assert!(!store.is_empty());
    }
}
