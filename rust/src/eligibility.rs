//! Prerequisite eligibility checks.
//!
//! A course is eligible when every one of its prerequisite groups has at
//! least one member in the scheduled set. Courses without an entry, or with
//! an empty group sequence, are always eligible. An empty group can never be
//! satisfied, so its course is never eligible; the scheduler surfaces that as
//! a stall rather than an error here.

use crate::models::{CourseId, PrerequisiteGroup, PrerequisiteStructure, ScheduledSet};

#[inline]
fn group_satisfied(group: &PrerequisiteGroup, scheduled: &ScheduledSet) -> bool {
    group.iter().any(|prereq| scheduled.contains(prereq))
}

/// Decide whether `course` may be scheduled given the courses already taken.
///
/// Unknown ids are treated as having no prerequisites. Stops at the first
/// unsatisfied group.
pub fn is_eligible(
    course: CourseId,
    structure: &PrerequisiteStructure,
    scheduled: &ScheduledSet,
) -> bool {
    match structure.groups(course) {
        None => true,
        Some(groups) => groups.iter().all(|group| group_satisfied(group, scheduled)),
    }
}

/// Indices of the groups of `course` that are not yet satisfied.
pub fn unsatisfied_groups(
    course: CourseId,
    structure: &PrerequisiteStructure,
    scheduled: &ScheduledSet,
) -> Vec<usize> {
    structure
        .groups(course)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .filter(|(_, group)| !group_satisfied(group, scheduled))
        .map(|(idx, _)| idx)
        .collect()
}
