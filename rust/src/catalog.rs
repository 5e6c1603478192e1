//! Course metadata for display.
//!
//! Interns course codes (e.g. "MATH-101") to integer ids and keeps the name
//! and credit weight of each course. The planner only ever sees the ids.

use rustc_hash::FxHashMap;

use crate::models::CourseId;

/// Credit weight assumed for courses registered without one.
pub const DEFAULT_CREDITS: u32 = 3;

/// Display metadata for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseInfo {
    pub code: String,
    pub name: String,
    pub credits: u32,
}

/// Catalog mapping course codes to ids, with metadata per id.
///
/// Ids are assigned sequentially from 0 in registration order.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    to_id: FxHashMap<String, CourseId>,
    courses: Vec<CourseInfo>,
}

impl CourseCatalog {
    /// Create a new catalog with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            courses: Vec::with_capacity(capacity),
        }
    }

    /// Intern a course code, returning its id.
    /// Unknown codes are registered with the code as name and default credits.
    pub fn intern(&mut self, code: &str) -> CourseId {
        if let Some(&id) = self.to_id.get(code) {
            return id;
        }
        let id = self.courses.len() as CourseId;
        self.courses.push(CourseInfo {
            code: code.to_string(),
            name: code.to_string(),
            credits: DEFAULT_CREDITS,
        });
        self.to_id.insert(code.to_string(), id);
        id
    }

    /// Register a course with full metadata, overwriting any previous
    /// name and credits for the same code.
    pub fn register(&mut self, code: &str, name: &str, credits: u32) -> CourseId {
        let id = self.intern(code);
        let info = &mut self.courses[id as usize];
        info.name = name.to_string();
        info.credits = credits;
        id
    }

    /// Get the id for a course code, if it exists.
    #[inline]
    pub fn id_of(&self, code: &str) -> Option<CourseId> {
        self.to_id.get(code).copied()
    }

    #[inline]
    pub fn get(&self, id: CourseId) -> Option<&CourseInfo> {
        self.courses.get(id as usize)
    }

    /// Ids of every registered course, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CourseId> {
        0..self.courses.len() as CourseId
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
