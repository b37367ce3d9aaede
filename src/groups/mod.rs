//! Setting groups, one per functional area of the application.
//!
//! Each group creates its settings in a fixed order and exposes them as
//! named fields. Keys are namespaced by a group prefix.

pub mod general;
pub mod graph;
pub mod location;
pub mod other;
pub mod scheduler;

use std::fmt::{Display, Formatter, Result as FmtResult};

pub use {
    general::GeneralSettings, graph::GraphSettings, location::LocationSettings,
    other::OtherSettings, scheduler::SchedulerSettings,
};

/// Identifies a setting group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupName {
    General,
    Graph,
    Scheduler,
    Location,
    Other,
}

impl GroupName {
    /// Groups in the order the registry loads them.
    pub const LOAD_ORDER: [Self; 5] = [
        Self::General,
        Self::Graph,
        Self::Scheduler,
        Self::Location,
        Self::Other,
    ];

    /// Lowercase group name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Graph => "graph",
            Self::Scheduler => "scheduler",
            Self::Location => "location",
            Self::Other => "other",
        }
    }

    /// Key prefix shared by the group's settings, if the group has one.
    #[must_use]
    pub fn key_prefix(self) -> Option<&'static str> {
        match self {
            Self::General => Some("APP_"),
            Self::Graph => Some("GRAPH_"),
            Self::Scheduler => Some("SCHED_"),
            Self::Location => Some("LOC_"),
            Self::Other => None,
        }
    }
}

impl Display for GroupName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
