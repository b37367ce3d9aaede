//! Settings for location tracking.

use std::sync::Arc;

use crate::{
    binding::{BoolSetting, IntSetting},
    store::PreferenceStore,
};

pub const COLLECT_DATA_KEY: &str = "LOC_COLLECT_DATA";
pub const STREAM_MORE_KEY: &str = "LOC_STREAM_MORE";
pub const MIN_TIME_KEY: &str = "LOC_MIN_TIME";
pub const MIN_DIST_KEY: &str = "LOC_MIN_DIST";

pub const COLLECT_DATA_DEFAULT: bool = true;
pub const STREAM_MORE_DEFAULT: bool = false;
/// Seconds.
pub const MIN_TIME_DEFAULT: i32 = 5;
/// Meters.
pub const MIN_DIST_DEFAULT: i32 = 5;

/// Location tracking settings.
#[derive(Debug, Clone)]
pub struct LocationSettings {
    pub collect_location_data: BoolSetting,
    /// Use the streaming API when the vehicle allows it.
    pub stream_when_possible: BoolSetting,
    /// Minimum seconds between recorded samples.
    pub loc_min_time: IntSetting,
    /// Minimum meters between recorded samples.
    pub loc_min_dist: IntSetting,
}

impl LocationSettings {
    /// Loads the location settings.
    pub fn load(store: &Arc<dyn PreferenceStore>) -> Self {
        Self {
            collect_location_data: BoolSetting::create(
                store.clone(),
                COLLECT_DATA_KEY,
                COLLECT_DATA_DEFAULT,
            ),
            stream_when_possible: BoolSetting::create(
                store.clone(),
                STREAM_MORE_KEY,
                STREAM_MORE_DEFAULT,
            ),
            loc_min_time: IntSetting::create(store.clone(), MIN_TIME_KEY, MIN_TIME_DEFAULT),
            loc_min_dist: IntSetting::create(store.clone(), MIN_DIST_KEY, MIN_DIST_DEFAULT),
        }
    }
}
