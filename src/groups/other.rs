//! Settings that belong to no particular view.

use std::sync::Arc;

use crate::{binding::StringSetting, store::PreferenceStore};

pub const NOTIFICATION_ADDRESS_KEY: &str = "NOTIFICATION_ADDR";
pub const NOTIFICATION_ADDRESS_DEFAULT: &str = "";

#[derive(Debug, Clone)]
pub struct OtherSettings {
    /// Address notifications are sent to.
    pub notification_address: StringSetting,
}

impl OtherSettings {
    pub fn load(store: &Arc<dyn PreferenceStore>) -> Self {
        Self {
            notification_address: StringSetting::create(
                store.clone(),
                NOTIFICATION_ADDRESS_KEY,
                NOTIFICATION_ADDRESS_DEFAULT.to_string(),
            ),
        }
    }
}
