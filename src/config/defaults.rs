//! Application-wide default values that are not fixed in the key table.

use std::env::var;

use tracing::debug;

/// Environment variable holding the built-in Google Maps API key.
pub const GOOGLE_API_KEY_ENV: &str = "PREFBIND_GOOGLE_API_KEY";

/// Environment variable holding the built-in MailGun key.
pub const MAILGUN_KEY_ENV: &str = "PREFBIND_MAILGUN_KEY";

/// App-wide service keys used as defaults for the custom-key settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppDefaults {
    /// Default for `APP_CUSTOM_GKEY`.
    pub google_api_key: String,
    /// Default for `APP_CUSTOM_MGKEY`.
    pub mailgun_key: String,
}

impl AppDefaults {
    /// Reads the service keys from the environment.
    ///
    /// Unset variables resolve to empty keys.
    #[must_use]
    pub fn from_env() -> Self {
        let google_api_key = var(GOOGLE_API_KEY_ENV).unwrap_or_default();
        let mailgun_key = var(MAILGUN_KEY_ENV).unwrap_or_default();
        debug!(
            google_key_set = !google_api_key.is_empty(),
            mailgun_key_set = !mailgun_key.is_empty(),
            "Loaded app defaults from environment"
        );
        Self {
            google_api_key,
            mailgun_key,
        }
    }
}
