//! Durable key-value preference storage.
//!
//! A `PreferenceStore` maps string keys to integer, boolean, or string
//! values. Typed reads take a default and never fail: absent keys and values
//! that cannot be read as the requested type resolve to that default.

pub mod json;
pub mod memory;

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

pub use {json::JsonPreferenceStore, memory::MemoryPreferenceStore};

/// A single stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PrefValue {
    /// Boolean preference.
    Bool(bool),
    /// Integer preference.
    Int(i32),
    /// String preference.
    Text(String),
}

impl PrefValue {
    /// Reads the value as an integer.
    ///
    /// Text that parses as a decimal `i32` is accepted.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Reads the value as a boolean.
    ///
    /// Text equal to `true` or `false` (any ASCII case) is accepted.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(text) if text.eq_ignore_ascii_case("true") => Some(true),
            Self::Text(text) if text.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// Reads the value as a string. Every stored value has a text form.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// Converts a JSON scalar into a preference value.
    ///
    /// Returns `None` for nulls, arrays, objects and numbers outside `i32`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(value) => Some(Self::Bool(*value)),
            serde_json::Value::Number(number) => number
                .as_i64()
                .and_then(|wide| i32::try_from(wide).ok())
                .map(Self::Int),
            serde_json::Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}

impl Display for PrefValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Durable mapping from string key to a typed preference value.
///
/// Implementations must make a `put_*` durable before returning. Failures
/// are the store's concern and are not reported to callers.
pub trait PreferenceStore: Send + Sync {
    /// Returns the raw stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: PrefValue);

    /// Reads an integer, falling back to `default`.
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get(key)
            .and_then(|value| value.as_int())
            .unwrap_or(default)
    }

    /// Stores an integer.
    fn put_int(&self, key: &str, value: i32) {
        self.put(key, PrefValue::Int(value));
    }

    /// Reads a boolean, falling back to `default`.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(|value| value.as_bool())
            .unwrap_or(default)
    }

    /// Stores a boolean.
    fn put_bool(&self, key: &str, value: bool) {
        self.put(key, PrefValue::Bool(value));
    }

    /// Reads a string, falling back to `default`.
    fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key)
            .map_or_else(|| default.to_string(), |value| value.as_text())
    }

    /// Stores a string.
    fn put_string(&self, key: &str, value: &str) {
        self.put(key, PrefValue::Text(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::store::{MemoryPreferenceStore, PrefValue, PreferenceStore};

    #[test]
    fn test_typed_reads_fall_back_to_default_when_absent() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get_int("MISSING", 15), 15);
        assert!(store.get_bool("MISSING", true));
        assert_eq!(store.get_string("MISSING", "All"), "All");
    }

    #[test]
    fn test_lenient_reads_from_text() {
        let store = MemoryPreferenceStore::new();
        store.put("PORT", PrefValue::Text(" 9090 ".to_string()));
        store.put("FLAG", PrefValue::Text("TRUE".to_string()));
        store.put("BAD", PrefValue::Text("eighty".to_string()));

        assert_eq!(store.get_int("PORT", 0), 9090);
        assert!(store.get_bool("FLAG", false));
        assert_eq!(store.get_int("BAD", 8080), 8080);
        assert!(!store.get_bool("BAD", false));
    }

    #[test]
    fn test_mismatched_types() {
        let store = MemoryPreferenceStore::new();
        store.put_bool("FLAG", true);
        store.put_int("COUNT", 5);

        assert_eq!(store.get_int("FLAG", 7), 7);
        assert!(store.get_bool("COUNT", true));
        assert_eq!(store.get_string("COUNT", ""), "5");
        assert_eq!(store.get_string("FLAG", ""), "true");
    }

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(PrefValue::from_json(&json!(true)), Some(PrefValue::Bool(true)));
        assert_eq!(PrefValue::from_json(&json!(42)), Some(PrefValue::Int(42)));
        assert_eq!(
            PrefValue::from_json(&json!("x")),
            Some(PrefValue::Text("x".to_string()))
        );
        assert_eq!(PrefValue::from_json(&json!(1.5)), None);
        assert_eq!(PrefValue::from_json(&json!(5_000_000_000_i64)), None);
        assert_eq!(PrefValue::from_json(&json!([1])), None);
        assert_eq!(PrefValue::from_json(&json!(null)), None);
    }
}
