//! Core data types for the semester planner.

use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

use crate::PlannerError;

/// Course identifier (u32 for compact storage and fast hashing).
pub type CourseId = u32;

/// A set of alternative courses. Any one member satisfies the group.
pub type PrerequisiteGroup = Vec<CourseId>;

/// Courses already placed into some semester.
pub type ScheduledSet = FxHashSet<CourseId>;

/// Prerequisite logic for every course in a curriculum.
///
/// Each course maps to an ordered sequence of groups: all groups must be
/// satisfied (AND), and a group is satisfied by any one of its members (OR).
/// A course mapped to an empty sequence has no prerequisites.
///
/// Courses are enumerated in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrerequisiteStructure {
    groups: BTreeMap<CourseId, Vec<PrerequisiteGroup>>,
}

impl PrerequisiteStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prerequisite groups for a course, replacing any previous entry.
    pub fn insert(&mut self, course: CourseId, groups: Vec<PrerequisiteGroup>) {
        self.groups.insert(course, groups);
    }

    /// Register a course with no prerequisites. Existing entries are kept.
    pub fn add_course(&mut self, course: CourseId) {
        self.groups.entry(course).or_default();
    }

    /// Prerequisite groups for a course, if it has an entry.
    #[inline]
    pub fn groups(&self, course: CourseId) -> Option<&[PrerequisiteGroup]> {
        self.groups.get(&course).map(|g| g.as_slice())
    }

    pub fn contains(&self, course: CourseId) -> bool {
        self.groups.contains_key(&course)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CourseId, &[PrerequisiteGroup])> {
        self.groups.iter().map(|(&id, g)| (id, g.as_slice()))
    }

    /// The key set of the structure, in enumeration order.
    pub fn course_universe(&self) -> CourseUniverse {
        self.groups.keys().copied().collect()
    }
}

impl FromIterator<(CourseId, Vec<PrerequisiteGroup>)> for PrerequisiteStructure {
    fn from_iter<I: IntoIterator<Item = (CourseId, Vec<PrerequisiteGroup>)>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}

/// Ordered, duplicate-free set of course ids to plan for.
///
/// The order is the frontier enumeration order: when more courses are
/// eligible than a semester can hold, earlier ones win.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseUniverse {
    order: Vec<CourseId>,
    members: FxHashSet<CourseId>,
}

impl CourseUniverse {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn contains(&self, course: CourseId) -> bool {
        self.members.contains(&course)
    }

    pub fn iter(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[CourseId] {
        &self.order
    }
}

impl FromIterator<CourseId> for CourseUniverse {
    /// Keeps the first occurrence of each id.
    fn from_iter<I: IntoIterator<Item = CourseId>>(iter: I) -> Self {
        let mut universe = Self::default();
        for course in iter {
            if universe.members.insert(course) {
                universe.order.push(course);
            }
        }
        universe
    }
}

/// Semester-by-semester course plan.
///
/// Order within a semester reflects selection order only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    semesters: Vec<Vec<CourseId>>,
}

impl Plan {
    pub(crate) fn push_semester(&mut self, courses: Vec<CourseId>) {
        self.semesters.push(courses);
    }

    pub fn semesters(&self) -> &[Vec<CourseId>] {
        &self.semesters
    }

    pub fn semester_count(&self) -> usize {
        self.semesters.len()
    }

    /// Total number of courses across all semesters.
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(Vec::len).sum()
    }

    /// 1-based semester number in which a course is taken.
    pub fn semester_of(&self, course: CourseId) -> Option<usize> {
        self.semesters
            .iter()
            .position(|semester| semester.contains(&course))
            .map(|idx| idx + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[CourseId]> {
        self.semesters.iter().map(|s| s.as_slice())
    }

    pub fn into_semesters(self) -> Vec<Vec<CourseId>> {
        self.semesters
    }
}

impl From<Vec<Vec<CourseId>>> for Plan {
    fn from(semesters: Vec<Vec<CourseId>>) -> Self {
        Self { semesters }
    }
}

/// Terminal outcome of a planning run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Every course in the universe was scheduled.
    Completed(Plan),
    /// The frontier emptied while courses remained unscheduled.
    Stalled {
        /// Semesters committed before the stall.
        plan: Plan,
        scheduled_count: usize,
        total_count: usize,
        /// Unscheduled courses, in universe order.
        remaining: Vec<CourseId>,
    },
}

impl PlanOutcome {
    /// The (possibly partial) plan.
    pub fn plan(&self) -> &Plan {
        match self {
            Self::Completed(plan) | Self::Stalled { plan, .. } => plan,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn scheduled_count(&self) -> usize {
        match self {
            Self::Completed(plan) => plan.course_count(),
            Self::Stalled {
                scheduled_count, ..
            } => *scheduled_count,
        }
    }

    pub fn total_count(&self) -> usize {
        match self {
            Self::Completed(plan) => plan.course_count(),
            Self::Stalled { total_count, .. } => *total_count,
        }
    }

    /// Treat a stall as an error, dropping the partial plan.
    pub fn into_result(self) -> Result<Plan, PlannerError> {
        match self {
            Self::Completed(plan) => Ok(plan),
            Self::Stalled {
                scheduled_count,
                total_count,
                ..
            } => Err(PlannerError::UnsatisfiableGraph {
                scheduled: scheduled_count,
                total: total_count,
            }),
        }
    }
}
