//! Preference file location with XDG Base Directory compliance.

use std::{env::var, path::PathBuf};

/// Directory name used under the XDG config home.
pub const APP_DIR_NAME: &str = "prefbind";

/// File name of the durable preference store.
pub const PREFS_FILE_NAME: &str = "preferences.json";

/// Gets the path of the preferences file.
///
/// # Returns
///
/// `$XDG_CONFIG_HOME/prefbind/preferences.json`, falling back to
/// `$HOME/.config/prefbind/preferences.json`.
#[must_use]
pub fn get_prefs_path() -> PathBuf {
    let mut path = get_xdg_config_home();
    path.push(APP_DIR_NAME);
    path.push(PREFS_FILE_NAME);
    path
}

/// Gets the XDG config home directory.
///
/// Uses `XDG_CONFIG_HOME` if set and non-empty, otherwise `$HOME/.config`.
fn get_xdg_config_home() -> PathBuf {
    if let Ok(config_home) = var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".config");
        return path;
    }

    PathBuf::from(".")
}
