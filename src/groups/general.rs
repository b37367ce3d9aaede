//! General application settings.

use std::sync::Arc;

use tracing::debug;

use crate::{
    binding::{BoolSetting, IntSetting, StringSetting},
    config::AppDefaults,
    credential::{CredentialCodec, RestCredentials},
    store::PreferenceStore,
};

pub const WAKE_ON_TC_KEY: &str = "APP_WAKE_ON_TC";
pub const IDLE_THRESHOLD_KEY: &str = "APP_IDLE_THRESHOLD";
pub const OFFER_EXP_KEY: &str = "APP_OFFER_EXP";
pub const ENABLE_PROXY_KEY: &str = "APP_ENABLE_PROXY";
pub const PROXY_HOST_KEY: &str = "APP_PROXY_HOST";
pub const PROXY_PORT_KEY: &str = "APP_PROXY_PORT";
pub const USE_CUSTOM_GOOGLE_KEY: &str = "APP_USE_CUSTOM_GKEY";
pub const CUSTOM_GOOGLE_KEY: &str = "APP_CUSTOM_GKEY";
pub const USE_CUSTOM_MAILGUN_KEY: &str = "APP_USE_CUSTOM_MGKEY";
pub const CUSTOM_MAILGUN_KEY: &str = "APP_CUSTOM_MGKEY";
pub const FONT_SCALE_KEY: &str = "APP_FONT_SCALE";
pub const ENABLE_REST_KEY: &str = "APP_ENABLE_REST";
pub const REST_PORT_KEY: &str = "APP_REST_PORT";
pub const AUTH_CODE_KEY: &str = "APP_AUTH_CODE";

pub const WAKE_ON_TC_DEFAULT: bool = true;
pub const IDLE_THRESHOLD_DEFAULT: i32 = 15;
pub const OFFER_EXP_DEFAULT: bool = false;
pub const ENABLE_PROXY_DEFAULT: bool = false;
pub const PROXY_HOST_DEFAULT: &str = "";
pub const PROXY_PORT_DEFAULT: i32 = 8080;
pub const USE_CUSTOM_GOOGLE_DEFAULT: bool = false;
pub const USE_CUSTOM_MAILGUN_DEFAULT: bool = false;
pub const FONT_SCALE_DEFAULT: i32 = 100;
pub const ENABLE_REST_DEFAULT: bool = false;
pub const REST_PORT_DEFAULT: i32 = 9090;
pub const AUTH_CODE_DEFAULT: &str = "";

/// Application-wide settings.
#[derive(Debug, Clone)]
pub struct GeneralSettings {
    /// Minutes of inactivity before the vehicle is considered idle.
    pub idle_threshold_in_minutes: IntSetting,
    /// Wake the vehicle when switching tabs.
    pub wake_on_tab_change: BoolSetting,
    /// Offer experimental features.
    pub offer_experimental: BoolSetting,
    pub enable_proxy: BoolSetting,
    pub proxy_host: StringSetting,
    pub proxy_port: IntSetting,
    pub use_custom_google_api_key: BoolSetting,
    pub google_api_key: StringSetting,
    pub use_custom_mailgun_key: BoolSetting,
    pub mailgun_key: StringSetting,
    /// UI font scale in percent.
    pub font_scale: IntSetting,
    /// Serve the REST interface.
    pub enable_rest: BoolSetting,
    pub rest_port: IntSetting,
    /// Stored form of the REST credential, see [`crate::credential`].
    pub auth_code: StringSetting,
}

impl GeneralSettings {
    /// Loads the general settings and derives the REST credentials.
    ///
    /// # Arguments
    ///
    /// * `store` - Backing preference store
    /// * `defaults` - App-wide default service keys
    /// * `codec` - Transform splitting the auth code
    /// * `credentials` - Receives the salt and secret derived from the auth code
    pub fn load(
        store: &Arc<dyn PreferenceStore>,
        defaults: &AppDefaults,
        codec: &dyn CredentialCodec,
        credentials: &mut RestCredentials,
    ) -> Self {
        let wake_on_tab_change =
            BoolSetting::create(store.clone(), WAKE_ON_TC_KEY, WAKE_ON_TC_DEFAULT);
        let offer_experimental =
            BoolSetting::create(store.clone(), OFFER_EXP_KEY, OFFER_EXP_DEFAULT);
        let idle_threshold_in_minutes =
            IntSetting::create(store.clone(), IDLE_THRESHOLD_KEY, IDLE_THRESHOLD_DEFAULT);
        let enable_proxy =
            BoolSetting::create(store.clone(), ENABLE_PROXY_KEY, ENABLE_PROXY_DEFAULT);
        let proxy_host =
            StringSetting::create(store.clone(), PROXY_HOST_KEY, PROXY_HOST_DEFAULT.to_string());
        let proxy_port = IntSetting::create(store.clone(), PROXY_PORT_KEY, PROXY_PORT_DEFAULT);
        let use_custom_google_api_key = BoolSetting::create(
            store.clone(),
            USE_CUSTOM_GOOGLE_KEY,
            USE_CUSTOM_GOOGLE_DEFAULT,
        );
        let google_api_key = StringSetting::create(
            store.clone(),
            CUSTOM_GOOGLE_KEY,
            defaults.google_api_key.clone(),
        );
        let use_custom_mailgun_key = BoolSetting::create(
            store.clone(),
            USE_CUSTOM_MAILGUN_KEY,
            USE_CUSTOM_MAILGUN_DEFAULT,
        );
        let mailgun_key = StringSetting::create(
            store.clone(),
            CUSTOM_MAILGUN_KEY,
            defaults.mailgun_key.clone(),
        );
        let font_scale = IntSetting::create(store.clone(), FONT_SCALE_KEY, FONT_SCALE_DEFAULT);
        let enable_rest =
            BoolSetting::create(store.clone(), ENABLE_REST_KEY, ENABLE_REST_DEFAULT);
        let rest_port = IntSetting::create(store.clone(), REST_PORT_KEY, REST_PORT_DEFAULT);
        let auth_code =
            StringSetting::create(store.clone(), AUTH_CODE_KEY, AUTH_CODE_DEFAULT.to_string());

        let settings = Self {
            idle_threshold_in_minutes,
            wake_on_tab_change,
            offer_experimental,
            enable_proxy,
            proxy_host,
            proxy_port,
            use_custom_google_api_key,
            google_api_key,
            use_custom_mailgun_key,
            mailgun_key,
            font_scale,
            enable_rest,
            rest_port,
            auth_code,
        };

        *credentials = settings.derive_credentials(codec);
        debug!(
            rest_credentials_set = !credentials.is_empty(),
            "Loaded general settings"
        );
        settings
    }

    /// Splits the current auth code into salt and encrypted secret.
    #[must_use]
    pub fn derive_credentials(&self, codec: &dyn CredentialCodec) -> RestCredentials {
        codec.internal_rep(&self.auth_code.get())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        config::AppDefaults,
        credential::{Base64CredentialCodec, RestCredentials},
        groups::general::{AUTH_CODE_KEY, GeneralSettings},
        store::{MemoryPreferenceStore, PrefValue, PreferenceStore},
    };

    #[test]
    fn test_service_keys_default_to_app_defaults() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let defaults = AppDefaults {
            google_api_key: "g-key".to_string(),
            mailgun_key: "mg-key".to_string(),
        };
        let mut credentials = RestCredentials::default();

        let general = GeneralSettings::load(
            &store,
            &defaults,
            &Base64CredentialCodec,
            &mut credentials,
        );
        assert_eq!(general.google_api_key.get(), "g-key");
        assert_eq!(general.mailgun_key.get(), "mg-key");
        assert!(credentials.is_empty());
    }

    #[test]
    fn test_credentials_derived_from_stored_auth_code() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::with_entries([(
            AUTH_CODE_KEY,
            PrefValue::Text("AQID:c2VjcmV0".to_string()),
        )]));
        let mut credentials = RestCredentials {
            salt: vec![9],
            encrypted: vec![9],
        };

        GeneralSettings::load(
            &store,
            &AppDefaults::default(),
            &Base64CredentialCodec,
            &mut credentials,
        );
        assert_eq!(credentials.salt, vec![1, 2, 3]);
        assert_eq!(credentials.encrypted, b"secret".to_vec());
    }

    #[test]
    fn test_changing_auth_code_does_not_rederive() {
        let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());
        let mut credentials = RestCredentials::default();
        let general = GeneralSettings::load(
            &store,
            &AppDefaults::default(),
            &Base64CredentialCodec,
            &mut credentials,
        );

        general.auth_code.set("AQID:c2VjcmV0");
        assert!(credentials.is_empty());
        assert_eq!(
            general.derive_credentials(&Base64CredentialCodec).salt,
            vec![1, 2, 3]
        );
        assert_eq!(store.get_string(AUTH_CODE_KEY, ""), "AQID:c2VjcmV0");
    }
}
