//! Settings for the graphs view.

use std::sync::Arc;

use crate::{
    binding::{BoolSetting, IntSetting, StringSetting},
    store::PreferenceStore,
};

pub const PERIOD_KEY: &str = "GRAPH_PERIOD";
pub const GAP_IGNORE_KEY: &str = "GRAPH_GAP_IGNORE";
pub const GAP_TIME_KEY: &str = "GRAPH_GAP_TIME";

/// Name of the load period covering all recorded data.
pub const LOAD_PERIOD_ALL: &str = "All";

pub const PERIOD_DEFAULT: &str = LOAD_PERIOD_ALL;
pub const GAP_IGNORE_DEFAULT: bool = false;
/// Minutes.
pub const GAP_TIME_DEFAULT: i32 = 15;

/// Graph settings.
#[derive(Debug, Clone)]
pub struct GraphSettings {
    /// Name of the period of data to load.
    pub load_period: StringSetting,
    /// Draw through gaps in the data instead of breaking the line.
    pub ignore_graph_gaps: BoolSetting,
    /// Minutes without samples that count as a gap.
    pub graph_gap_time: IntSetting,
}

impl GraphSettings {
    /// Loads the graph settings.
    pub fn load(store: &Arc<dyn PreferenceStore>) -> Self {
        Self {
            load_period: StringSetting::create(
                store.clone(),
                PERIOD_KEY,
                PERIOD_DEFAULT.to_string(),
            ),
            ignore_graph_gaps: BoolSetting::create(
                store.clone(),
                GAP_IGNORE_KEY,
                GAP_IGNORE_DEFAULT,
            ),
            graph_gap_time: IntSetting::create(store.clone(), GAP_TIME_KEY, GAP_TIME_DEFAULT),
        }
    }
}
