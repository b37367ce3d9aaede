//! The settings registry and the canonical key table.
//!
//! `SettingsRegistry` owns every setting group and loads them at startup.
//! The key table records each recognized key with its type, default and
//! group; keys and defaults must stay stable so persisted data keeps
//! loading.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    binding::{BoundSetting, PrefType},
    config::AppDefaults,
    credential::{Base64CredentialCodec, CredentialCodec, RestCredentials},
    groups::{
        GeneralSettings, GraphSettings, GroupName, LocationSettings, OtherSettings,
        SchedulerSettings, general, graph, location, other, scheduler,
    },
    store::{PrefValue, PreferenceStore},
};

/// Value type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Int,
    Bool,
    String,
}

/// Default value of a setting as recorded in the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingDefault {
    Int(i32),
    Bool(bool),
    Str(&'static str),
    /// The app-wide Google Maps API key.
    GoogleApiKey,
    /// The app-wide MailGun key.
    MailGunKey,
}

impl SettingDefault {
    /// Resolves the default to a concrete value.
    #[must_use]
    pub fn resolve(self, defaults: &AppDefaults) -> PrefValue {
        match self {
            Self::Int(value) => PrefValue::Int(value),
            Self::Bool(value) => PrefValue::Bool(value),
            Self::Str(value) => PrefValue::Text(value.to_string()),
            Self::GoogleApiKey => PrefValue::Text(defaults.google_api_key.clone()),
            Self::MailGunKey => PrefValue::Text(defaults.mailgun_key.clone()),
        }
    }
}

/// One row of the key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingSpec {
    pub key: &'static str,
    pub kind: SettingKind,
    pub default: SettingDefault,
    pub group: GroupName,
}

const fn spec(
    key: &'static str,
    kind: SettingKind,
    default: SettingDefault,
    group: GroupName,
) -> SettingSpec {
    SettingSpec {
        key,
        kind,
        default,
        group,
    }
}

/// Every recognized setting.
pub const SETTING_TABLE: [SettingSpec; 24] = {
    use crate::{
        groups::GroupName::{General, Graph, Location, Other, Scheduler},
        registry::{
            SettingDefault as D,
            SettingKind::{Bool, Int, String},
        },
    };

    [
        spec(general::WAKE_ON_TC_KEY, Bool, D::Bool(general::WAKE_ON_TC_DEFAULT), General),
        spec(general::IDLE_THRESHOLD_KEY, Int, D::Int(general::IDLE_THRESHOLD_DEFAULT), General),
        spec(general::OFFER_EXP_KEY, Bool, D::Bool(general::OFFER_EXP_DEFAULT), General),
        spec(general::ENABLE_PROXY_KEY, Bool, D::Bool(general::ENABLE_PROXY_DEFAULT), General),
        spec(general::PROXY_HOST_KEY, String, D::Str(general::PROXY_HOST_DEFAULT), General),
        spec(general::PROXY_PORT_KEY, Int, D::Int(general::PROXY_PORT_DEFAULT), General),
        spec(
            general::USE_CUSTOM_GOOGLE_KEY,
            Bool,
            D::Bool(general::USE_CUSTOM_GOOGLE_DEFAULT),
            General,
        ),
        spec(general::CUSTOM_GOOGLE_KEY, String, D::GoogleApiKey, General),
        spec(
            general::USE_CUSTOM_MAILGUN_KEY,
            Bool,
            D::Bool(general::USE_CUSTOM_MAILGUN_DEFAULT),
            General,
        ),
        spec(general::CUSTOM_MAILGUN_KEY, String, D::MailGunKey, General),
        spec(general::FONT_SCALE_KEY, Int, D::Int(general::FONT_SCALE_DEFAULT), General),
        spec(general::ENABLE_REST_KEY, Bool, D::Bool(general::ENABLE_REST_DEFAULT), General),
        spec(general::REST_PORT_KEY, Int, D::Int(general::REST_PORT_DEFAULT), General),
        spec(general::AUTH_CODE_KEY, String, D::Str(general::AUTH_CODE_DEFAULT), General),
        spec(graph::PERIOD_KEY, String, D::Str(graph::PERIOD_DEFAULT), Graph),
        spec(graph::GAP_IGNORE_KEY, Bool, D::Bool(graph::GAP_IGNORE_DEFAULT), Graph),
        spec(graph::GAP_TIME_KEY, Int, D::Int(graph::GAP_TIME_DEFAULT), Graph),
        spec(
            scheduler::SAFE_BATTERY_KEY,
            Bool,
            D::Bool(scheduler::SAFE_BATTERY_DEFAULT),
            Scheduler,
        ),
        spec(
            scheduler::SAFE_PLUGGED_IN_KEY,
            Bool,
            D::Bool(scheduler::SAFE_PLUGGED_IN_DEFAULT),
            Scheduler,
        ),
        spec(location::COLLECT_DATA_KEY, Bool, D::Bool(location::COLLECT_DATA_DEFAULT), Location),
        spec(location::STREAM_MORE_KEY, Bool, D::Bool(location::STREAM_MORE_DEFAULT), Location),
        spec(location::MIN_TIME_KEY, Int, D::Int(location::MIN_TIME_DEFAULT), Location),
        spec(location::MIN_DIST_KEY, Int, D::Int(location::MIN_DIST_DEFAULT), Location),
        spec(
            other::NOTIFICATION_ADDRESS_KEY,
            String,
            D::Str(other::NOTIFICATION_ADDRESS_DEFAULT),
            Other,
        ),
    ]
};

/// Looks up a key in the key table.
#[must_use]
pub fn find_spec(key: &str) -> Option<&'static SettingSpec> {
    SETTING_TABLE.iter().find(|spec| spec.key == key)
}

/// Owner of every setting group.
///
/// Fields hand out long-lived setting handles; clone a handle to keep it
/// beyond the registry borrow.
#[derive(Debug, Clone)]
pub struct SettingsRegistry {
    pub general: GeneralSettings,
    pub graph: GraphSettings,
    pub scheduler: SchedulerSettings,
    pub location: LocationSettings,
    pub other: OtherSettings,
}

impl SettingsRegistry {
    /// Loads every group using the default auth code transform.
    ///
    /// # Arguments
    ///
    /// * `store` - Backing preference store
    /// * `defaults` - App-wide default service keys
    /// * `credentials` - Receives the REST credentials derived from the auth code
    pub fn initialize(
        store: Arc<dyn PreferenceStore>,
        defaults: &AppDefaults,
        credentials: &mut RestCredentials,
    ) -> Self {
        Self::initialize_with_codec(store, defaults, &Base64CredentialCodec, credentials)
    }

    /// Loads every group, splitting the auth code with `codec`.
    ///
    /// General is loaded first since it fills `credentials`; the other
    /// groups do not depend on it.
    pub fn initialize_with_codec(
        store: Arc<dyn PreferenceStore>,
        defaults: &AppDefaults,
        codec: &dyn CredentialCodec,
        credentials: &mut RestCredentials,
    ) -> Self {
        debug!("Loading settings groups in order: {:?}", GroupName::LOAD_ORDER);
        let general = GeneralSettings::load(&store, defaults, codec, credentials);
        let graph = GraphSettings::load(&store);
        let scheduler = SchedulerSettings::load(&store);
        let location = LocationSettings::load(&store);
        let other = OtherSettings::load(&store);
        info!("Loaded {} settings", SETTING_TABLE.len());

        Self {
            general,
            graph,
            scheduler,
            location,
            other,
        }
    }

    /// Returns every setting's key and current value, in key table order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, PrefValue)> {
        let general = &self.general;
        let graph = &self.graph;
        let scheduler = &self.scheduler;
        let location = &self.location;
        vec![
            entry(&general.wake_on_tab_change),
            entry(&general.idle_threshold_in_minutes),
            entry(&general.offer_experimental),
            entry(&general.enable_proxy),
            entry(&general.proxy_host),
            entry(&general.proxy_port),
            entry(&general.use_custom_google_api_key),
            entry(&general.google_api_key),
            entry(&general.use_custom_mailgun_key),
            entry(&general.mailgun_key),
            entry(&general.font_scale),
            entry(&general.enable_rest),
            entry(&general.rest_port),
            entry(&general.auth_code),
            entry(&graph.load_period),
            entry(&graph.ignore_graph_gaps),
            entry(&graph.graph_gap_time),
            entry(&scheduler.safe_includes_min_charge),
            entry(&scheduler.safe_includes_plugged_in),
            entry(&location.collect_location_data),
            entry(&location.stream_when_possible),
            entry(&location.loc_min_time),
            entry(&location.loc_min_dist),
            entry(&self.other.notification_address),
        ]
    }
}

fn entry<T: PrefType>(setting: &BoundSetting<T>) -> (&'static str, PrefValue) {
    (setting.key(), setting.pref_value())
}
