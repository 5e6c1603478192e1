//! Leveled semester scheduler.
//!
//! Repeatedly computes the eligible frontier, commits a capacity-bounded
//! slice of it as the next semester, and stops when every course is placed
//! or the frontier runs dry.

mod core;
mod state;

pub use self::core::{compare_capacities, plan_semesters, PlannerError, SemesterPlanner};
pub use self::state::PlanState;
