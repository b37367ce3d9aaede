//! Observable settings kept in sync with a preference store.
//!
//! A `BoundSetting` is seeded from the store (or its default) once, at
//! creation. After that reads are served from memory and every `set` is
//! written through to the store before it returns.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use {
    async_channel::{Receiver, Sender, unbounded},
    parking_lot::RwLock,
    tracing::debug,
};

use crate::store::{PrefValue, PreferenceStore};

/// Value types that can be bound to a preference key.
pub trait PrefType: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Reads the value for `key`, substituting `default` when absent or
    /// unreadable as this type.
    fn load(store: &dyn PreferenceStore, key: &str, default: &Self) -> Self;

    /// Writes the value under `key`.
    fn persist(&self, store: &dyn PreferenceStore, key: &str);

    /// Converts the value into its stored representation.
    fn to_pref_value(&self) -> PrefValue;
}

impl PrefType for i32 {
    fn load(store: &dyn PreferenceStore, key: &str, default: &Self) -> Self {
        store.get_int(key, *default)
    }

    fn persist(&self, store: &dyn PreferenceStore, key: &str) {
        store.put_int(key, *self);
    }

    fn to_pref_value(&self) -> PrefValue {
        PrefValue::Int(*self)
    }
}

impl PrefType for bool {
    fn load(store: &dyn PreferenceStore, key: &str, default: &Self) -> Self {
        store.get_bool(key, *default)
    }

    fn persist(&self, store: &dyn PreferenceStore, key: &str) {
        store.put_bool(key, *self);
    }

    fn to_pref_value(&self) -> PrefValue {
        PrefValue::Bool(*self)
    }
}

impl PrefType for String {
    fn load(store: &dyn PreferenceStore, key: &str, default: &Self) -> Self {
        store.get_string(key, default)
    }

    fn persist(&self, store: &dyn PreferenceStore, key: &str) {
        store.put_string(key, self);
    }

    fn to_pref_value(&self) -> PrefValue {
        PrefValue::Text(self.clone())
    }
}

/// State shared by every handle to one setting.
struct Shared<T: PrefType> {
    /// Preference key.
    key: &'static str,
    /// Value used when the store holds nothing usable.
    default: T,
    /// Current in-memory value.
    value: RwLock<T>,
    /// Backing store for write-through.
    store: Arc<dyn PreferenceStore>,
    /// Active change subscribers.
    subscribers: RwLock<Vec<Sender<T>>>,
}

/// A typed setting bound to one preference key.
///
/// Cloning yields another handle to the same setting, so every holder sees
/// writes made through any other handle.
pub struct BoundSetting<T: PrefType> {
    shared: Arc<Shared<T>>,
}

/// Integer setting.
pub type IntSetting = BoundSetting<i32>;
/// Boolean setting.
pub type BoolSetting = BoundSetting<bool>;
/// String setting.
pub type StringSetting = BoundSetting<String>;

impl<T: PrefType> BoundSetting<T> {
    /// Creates a setting seeded from `store`.
    ///
    /// The default is not written back to the store; a key first appears
    /// there on the first `set`.
    ///
    /// # Arguments
    ///
    /// * `store` - Backing preference store
    /// * `key` - Preference key
    /// * `default` - Value used when the store has no usable entry
    pub fn create(store: Arc<dyn PreferenceStore>, key: &'static str, default: T) -> Self {
        let value = T::load(store.as_ref(), key, &default);
        debug!(key = key, value = ?value, "Loaded setting");

        Self {
            shared: Arc::new(Shared {
                key,
                default,
                value: RwLock::new(value),
                store,
                subscribers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Gets the current value without touching the store.
    #[must_use]
    pub fn get(&self) -> T {
        self.shared.value.read().clone()
    }

    /// Sets the value and writes it through to the store.
    ///
    /// The store write happens on every call, before this returns.
    /// Subscribers are notified only when the value actually changed.
    pub fn set(&self, value: impl Into<T>) {
        let value = value.into();
        // Persist and notify under the value lock so the store and every
        // subscriber see writes in the same order as memory.
        let mut current = self.shared.value.write();
        let changed = *current != value;
        *current = value.clone();
        value.persist(self.shared.store.as_ref(), self.shared.key);
        if changed {
            self.broadcast(&value);
        }
        drop(current);

        debug!(key = self.shared.key, value = ?value, changed, "Persisted setting");
    }

    /// Sets the value back to its default, writing it through.
    pub fn reset(&self) {
        self.set(self.shared.default.clone());
    }

    /// Gets the preference key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.shared.key
    }

    /// Gets the default value fixed at creation.
    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.shared.default
    }

    /// Gets the current value in its stored representation.
    #[must_use]
    pub fn pref_value(&self) -> PrefValue {
        self.shared.value.read().to_pref_value()
    }

    /// Subscribes to future changes of this setting.
    ///
    /// # Returns
    ///
    /// A receiver yielding each new value. Dropping it unsubscribes.
    pub fn subscribe(&self) -> Receiver<T> {
        debug!(key = self.shared.key, "New setting subscription");
        let (tx, rx) = unbounded();
        self.shared.subscribers.write().push(tx);
        rx
    }

    /// Sends `value` to all subscribers, dropping closed channels.
    fn broadcast(&self, value: &T) -> usize {
        let mut subscribers = self.shared.subscribers.write();
        subscribers.retain(|tx| tx.try_send(value.clone()).is_ok());
        subscribers.len()
    }
}

impl<T: PrefType> Clone for BoundSetting<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: PrefType> Debug for BoundSetting<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BoundSetting")
            .field("key", &self.shared.key)
            .field("value", &*self.shared.value.read())
            .field("default", &self.shared.default)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread::scope};

    use tokio::test as TokioTest;

    use crate::{
        binding::{BoolSetting, BoundSetting, IntSetting, StringSetting},
        store::{MemoryPreferenceStore, PrefValue, PreferenceStore},
    };

    fn memory_store() -> Arc<MemoryPreferenceStore> {
        Arc::new(MemoryPreferenceStore::new())
    }

    #[test]
    fn test_empty_store_yields_default_for_each_type() {
        let store = memory_store();

        let int = IntSetting::create(store.clone(), "INT", 15);
        let flag = BoolSetting::create(store.clone(), "FLAG", true);
        let text = StringSetting::create(store.clone(), "TEXT", "All".to_string());

        assert_eq!(int.get(), 15);
        assert!(flag.get());
        assert_eq!(text.get(), "All");
    }

    #[test]
    fn test_create_does_not_write_default() {
        let store = memory_store();
        let _setting = IntSetting::create(store.clone(), "INT", 15);

        assert!(store.writes().is_empty());
        assert!(!store.contains("INT"));
    }

    #[test]
    fn test_set_round_trips_through_fresh_setting() {
        let store = memory_store();

        IntSetting::create(store.clone(), "INT", 15).set(-3);
        BoolSetting::create(store.clone(), "FLAG", true).set(false);
        StringSetting::create(store.clone(), "TEXT", String::new()).set("proxy.local");

        assert_eq!(IntSetting::create(store.clone(), "INT", 15).get(), -3);
        assert!(!BoolSetting::create(store.clone(), "FLAG", true).get());
        assert_eq!(
            StringSetting::create(store.clone(), "TEXT", String::new()).get(),
            "proxy.local"
        );
    }

    #[test]
    fn test_every_set_is_written_without_coalescing() {
        let store = memory_store();
        let setting = IntSetting::create(store.clone(), "INT", 0);

        for value in [1, 2, 2, 3, 1] {
            setting.set(value);
            assert_eq!(store.get_int("INT", -1), value);
        }

        let written: Vec<_> = store.writes().into_iter().map(|(_, v)| v).collect();
        assert_eq!(
            written,
            [1, 2, 2, 3, 1].map(PrefValue::Int).to_vec()
        );
    }

    #[test]
    fn test_get_never_reads_store_after_load() {
        let store = memory_store();
        let setting = IntSetting::create(store.clone(), "INT", 5);

        // Writes behind the setting's back are not observed.
        store.put_int("INT", 99);
        assert_eq!(setting.get(), 5);
    }

    #[test]
    fn test_clones_share_value() {
        let store = memory_store();
        let setting = StringSetting::create(store.clone(), "TEXT", String::new());
        let other = setting.clone();

        other.set("shared");
        assert_eq!(setting.get(), "shared");
    }

    #[test]
    fn test_reset_writes_default() {
        let store = memory_store();
        let setting = IntSetting::create(store.clone(), "INT", 8080);
        setting.set(1);
        setting.reset();

        assert_eq!(setting.get(), 8080);
        assert_eq!(*setting.default_value(), 8080);
        assert_eq!(store.get_int("INT", 0), 8080);
        assert_eq!(store.write_count("INT"), 2);
    }

    #[test]
    fn test_malformed_stored_value_falls_back_to_default() {
        let store = Arc::new(MemoryPreferenceStore::with_entries([(
            "INT",
            PrefValue::Text("lots".to_string()),
        )]));
        let setting: BoundSetting<i32> = BoundSetting::create(store, "INT", 100);
        assert_eq!(setting.get(), 100);
        assert_eq!(setting.pref_value(), PrefValue::Int(100));
        assert_eq!(setting.key(), "INT");
    }

    #[TokioTest]
    async fn test_subscribers_see_changes_only() {
        let store = memory_store();
        let setting = BoolSetting::create(store.clone(), "FLAG", false);
        let receiver = setting.subscribe();

        setting.set(true);
        setting.set(true);
        setting.set(false);

        assert!(receiver.recv().await.unwrap());
        assert!(!receiver.recv().await.unwrap());
        assert!(receiver.is_empty());
        assert_eq!(store.write_count("FLAG"), 3);
    }

    #[TokioTest]
    async fn test_dropped_subscribers_are_pruned() {
        let store = memory_store();
        let setting = IntSetting::create(store, "INT", 0);
        let kept = setting.subscribe();
        drop(setting.subscribe());

        setting.set(7);
        assert_eq!(setting.broadcast(&8), 1);
        assert_eq!(kept.recv().await.unwrap(), 7);
    }

    #[test]
    fn test_concurrent_sets_notify_in_memory_order() {
        let store = memory_store();
        let setting = IntSetting::create(store.clone(), "INT", 0);
        let receiver = setting.subscribe();

        scope(|threads| {
            for worker in 0..4 {
                let setting = setting.clone();
                threads.spawn(move || {
                    for step in 1..=250 {
                        setting.set(worker * 1000 + step);
                    }
                });
            }
        });

        let mut last = None;
        while let Ok(value) = receiver.try_recv() {
            last = Some(value);
        }
        assert_eq!(last, Some(setting.get()));
        assert_eq!(store.get_int("INT", -1), setting.get());
        assert_eq!(
            store.writes().last().map(|(_, value)| value.clone()),
            Some(PrefValue::Int(setting.get()))
        );
    }
}
