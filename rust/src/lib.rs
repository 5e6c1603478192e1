//! Semester planning over a prerequisite graph.
//!
//! Given a curriculum whose prerequisites are AND-of-OR groups and a cap on
//! courses per semester, builds a semester-by-semester plan by repeatedly
//! taking the eligible frontier (leveled topological sort), greedily and
//! without backtracking. Graphs that can never be finished (cycles, empty
//! groups, missing courses) end in an explicit stall outcome.

// Allow clippy warning triggered by PyO3 macro expansion
#![cfg_attr(feature = "python", allow(clippy::useless_conversion))]

pub mod catalog;
mod config;
pub mod eligibility;
pub mod logging;
mod models;
pub mod report;
pub mod scheduler;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use catalog::{CourseCatalog, CourseInfo};
pub use config::PlannerConfig;
pub use eligibility::is_eligible;
pub use models::{
    CourseId, CourseUniverse, Plan, PlanOutcome, PrerequisiteGroup, PrerequisiteStructure,
    ScheduledSet,
};
pub use report::{render_comparison, render_plan};
pub use scheduler::{compare_capacities, plan_semesters, PlannerError, SemesterPlanner};
pub use validation::{validate_curriculum, ValidationError, ValidationErrorKind};
