//! Curriculum diagnostics.
//!
//! Checks a curriculum for problems that will make planning stall:
//! - Empty prerequisite groups
//! - Prerequisites referring to courses outside the universe
//! - Courses that never become eligible, even with unlimited capacity
//!   (prerequisite cycles and everything downstream of them)
//!
//! The planner never runs these checks itself; a stall is a normal outcome.

use crate::eligibility::is_eligible;
use crate::models::{CourseId, CourseUniverse, PrerequisiteStructure, ScheduledSet};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Course the problem was found on.
    pub course: CourseId,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A group with no alternatives; the course can never be eligible.
    EmptyGroup { group: usize },
    /// A prerequisite id that is not part of the course universe.
    UnknownPrerequisite { prerequisite: CourseId },
    /// The course is never eligible, whatever the capacity.
    Unreachable,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    fn new(kind: ValidationErrorKind, course: CourseId, message: impl Into<String>) -> Self {
        Self {
            kind,
            course,
            message: message.into(),
        }
    }
}

/// Courses reachable when every eligible course is taken each semester.
fn reachable_courses(universe: &CourseUniverse, structure: &PrerequisiteStructure) -> ScheduledSet {
    let mut reached = ScheduledSet::default();
    loop {
        let newly: Vec<CourseId> = universe
            .iter()
            .filter(|course| !reached.contains(course) && is_eligible(*course, structure, &reached))
            .collect();
        if newly.is_empty() {
            return reached;
        }
        reached.extend(newly);
    }
}

/// Validate the curriculum for the courses in `universe`.
///
/// Checks, per course in universe order:
/// 1. Every prerequisite group has at least one alternative
/// 2. Every alternative belongs to the universe
/// 3. The course is reachable with unlimited capacity
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_curriculum(
    universe: &CourseUniverse,
    structure: &PrerequisiteStructure,
) -> ValidationResult {
    let mut errors = Vec::new();

    for course in universe.iter() {
        let groups = structure.groups(course).unwrap_or_default();
        for (idx, group) in groups.iter().enumerate() {
            if group.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyGroup { group: idx },
                    course,
                    format!("Course {} has an empty prerequisite group at index {}", course, idx),
                ));
            }
            for &prereq in group {
                if !universe.contains(prereq) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownPrerequisite {
                            prerequisite: prereq,
                        },
                        course,
                        format!("Course {} references unknown prerequisite {}", course, prereq),
                    ));
                }
            }
        }
    }

    let reached = reachable_courses(universe, structure);
    for course in universe.iter().filter(|c| !reached.contains(c)) {
        errors.push(ValidationError::new(
            ValidationErrorKind::Unreachable,
            course,
            format!("Course {} can never become eligible", course),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
