//! Configuration types for the semester planner.

use crate::logging::VERBOSITY_SILENT;

/// Configuration for a planning run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum number of courses per semester. Must be positive.
    pub max_per_semester: i64,
    /// Logging verbosity (0 = silent, 3 = full internals)
    pub verbosity: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_per_semester: 5,
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl PlannerConfig {
    /// Config with the given capacity and default verbosity.
    pub fn with_capacity(max_per_semester: i64) -> Self {
        Self {
            max_per_semester,
            ..Self::default()
        }
    }
}
