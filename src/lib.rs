//! Prefbind - Typed settings bound to a durable preference store
//!
//! Application components read and write settings as live, observable
//! values; every write is persisted to the preference store before it
//! returns, and each setting is seeded with its default on first load.

pub mod binding;
pub mod config;
pub mod credential;
pub mod error;
pub mod groups;
pub mod registry;
pub mod store;

// Re-export key types for convenience
pub use {
    binding::{BoolSetting, BoundSetting, IntSetting, PrefType, StringSetting},
    config::AppDefaults,
    credential::{Base64CredentialCodec, CredentialCodec, RestCredentials},
    error::StoreError,
    groups::{GeneralSettings, GraphSettings, LocationSettings, OtherSettings, SchedulerSettings},
    registry::{SETTING_TABLE, SettingSpec, SettingsRegistry},
    store::{JsonPreferenceStore, MemoryPreferenceStore, PrefValue, PreferenceStore},
};
