//! Settings for the scheduler.

use std::sync::Arc;

use crate::{binding::BoolSetting, store::PreferenceStore};

pub const SAFE_BATTERY_KEY: &str = "SCHED_SAFE_BATTERY";
pub const SAFE_PLUGGED_IN_KEY: &str = "SCHED_SAFE_PLUGGED_IN";

pub const SAFE_BATTERY_DEFAULT: bool = true;
pub const SAFE_PLUGGED_IN_DEFAULT: bool = false;

/// Conditions a scheduled command checks before running in "safe" mode.
#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    /// Require a minimum battery charge.
    pub safe_includes_min_charge: BoolSetting,
    /// Require the vehicle to be plugged in.
    pub safe_includes_plugged_in: BoolSetting,
}

impl SchedulerSettings {
    /// Loads the scheduler settings.
    pub fn load(store: &Arc<dyn PreferenceStore>) -> Self {
        Self {
            safe_includes_min_charge: BoolSetting::create(
                store.clone(),
                SAFE_BATTERY_KEY,
                SAFE_BATTERY_DEFAULT,
            ),
            safe_includes_plugged_in: BoolSetting::create(
                store.clone(),
                SAFE_PLUGGED_IN_KEY,
                SAFE_PLUGGED_IN_DEFAULT,
            ),
        }
    }
}
