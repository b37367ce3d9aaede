//! Preference file location and application-wide defaults.

pub mod defaults;
pub mod paths;

pub use {
    defaults::AppDefaults,
    paths::get_prefs_path,
};
