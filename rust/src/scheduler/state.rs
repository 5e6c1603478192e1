//! Per-run planner state.

use crate::models::{CourseId, Plan, ScheduledSet};

/// Scheduled set and plan owned by a single planning run.
///
/// Both only grow: each committed semester is appended once and its courses
/// join the scheduled set.
#[derive(Clone, Debug, Default)]
pub struct PlanState {
    pub scheduled: ScheduledSet,
    pub plan: Plan,
}

impl PlanState {
    /// Create an empty state sized for `course_count` courses.
    pub fn with_capacity(course_count: usize) -> Self {
        Self {
            scheduled: ScheduledSet::with_capacity_and_hasher(course_count, Default::default()),
            plan: Plan::default(),
        }
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }

    /// Mark a semester's courses as scheduled and append it to the plan.
    pub fn commit(&mut self, semester: Vec<CourseId>) {
        self.scheduled.extend(semester.iter().copied());
        self.plan.push_semester(semester);
    }
}
