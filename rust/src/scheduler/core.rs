//! Core semester planning loop.

use thiserror::Error;

use crate::config::PlannerConfig;
use crate::eligibility::{is_eligible, unsatisfied_groups};
use crate::logging::VERBOSITY_CHECKS;
use crate::models::{CourseId, CourseUniverse, PlanOutcome, PrerequisiteStructure, ScheduledSet};
use crate::{log_changes, log_checks, log_debug};

use super::state::PlanState;

/// Errors that can occur during planning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid capacity: max courses per semester must be positive, got {0}")]
    InvalidCapacity(i64),
    #[error("Unsatisfiable prerequisite graph: scheduled {scheduled}/{total} courses")]
    UnsatisfiableGraph { scheduled: usize, total: usize },
}

/// Greedy leveled planner over a fixed curriculum.
///
/// Holds only shared references to the curriculum, so one planner (or
/// several with different capacities) can run on multiple threads at once.
#[derive(Debug, Clone)]
pub struct SemesterPlanner<'a> {
    universe: &'a CourseUniverse,
    structure: &'a PrerequisiteStructure,
    max_per_semester: usize,
    verbosity: u8,
}

impl<'a> SemesterPlanner<'a> {
    /// Create a new planner, rejecting non-positive capacities.
    pub fn new(
        universe: &'a CourseUniverse,
        structure: &'a PrerequisiteStructure,
        config: &PlannerConfig,
    ) -> Result<Self, PlannerError> {
        let max_per_semester = usize::try_from(config.max_per_semester)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(PlannerError::InvalidCapacity(config.max_per_semester))?;

        Ok(Self {
            universe,
            structure,
            max_per_semester,
            verbosity: config.verbosity,
        })
    }

    pub fn max_per_semester(&self) -> usize {
        self.max_per_semester
    }

    /// Run the planning loop.
    ///
    /// Each call starts from an empty scheduled set, so repeated calls return
    /// identical outcomes.
    pub fn plan(&self) -> PlanOutcome {
        let total = self.universe.len();
        let verbosity = self.verbosity;
        let mut state = PlanState::with_capacity(total);

        while state.scheduled_count() < total {
            let semester_number = state.plan.semester_count() + 1;
            let frontier = self.frontier(&state.scheduled);

            log_debug!(
                verbosity,
                "Semester {}: frontier {:?} ({} eligible, cap {})",
                semester_number,
                frontier,
                frontier.len(),
                self.max_per_semester
            );

            if frontier.is_empty() {
                let remaining: Vec<CourseId> = self
                    .universe
                    .iter()
                    .filter(|course| !state.scheduled.contains(course))
                    .collect();
                log_changes!(
                    verbosity,
                    "Stalled before semester {}: scheduled {}/{}, remaining {:?}",
                    semester_number,
                    state.scheduled_count(),
                    total,
                    remaining
                );
                return PlanOutcome::Stalled {
                    scheduled_count: state.scheduled_count(),
                    total_count: total,
                    plan: state.plan,
                    remaining,
                };
            }

            let semester: Vec<CourseId> =
                frontier.into_iter().take(self.max_per_semester).collect();
            log_changes!(
                verbosity,
                "Semester {}: scheduled {:?}",
                semester_number,
                semester
            );
            state.commit(semester);
        }

        log_changes!(
            verbosity,
            "Planned {} courses in {} semesters",
            total,
            state.plan.semester_count()
        );
        PlanOutcome::Completed(state.plan)
    }

    /// Unscheduled, eligible courses in universe order.
    ///
    /// Recomputed from scratch every semester: a newly scheduled course can
    /// satisfy a group of any remaining course.
    fn frontier(&self, scheduled: &ScheduledSet) -> Vec<CourseId> {
        let verbosity = self.verbosity;
        let mut frontier = Vec::new();

        for course in self.universe.iter() {
            if scheduled.contains(&course) {
                continue;
            }

            if is_eligible(course, self.structure, scheduled) {
                log_checks!(verbosity, "  Course {} eligible", course);
                frontier.push(course);
            } else if verbosity >= VERBOSITY_CHECKS {
                log_checks!(
                    verbosity,
                    "  Course {} blocked: unsatisfied groups {:?}",
                    course,
                    unsatisfied_groups(course, self.structure, scheduled)
                );
            }
        }

        frontier
    }
}

/// Plan a curriculum with the given per-semester capacity.
pub fn plan_semesters(
    universe: &CourseUniverse,
    structure: &PrerequisiteStructure,
    max_per_semester: i64,
) -> Result<PlanOutcome, PlannerError> {
    let config = PlannerConfig::with_capacity(max_per_semester);
    Ok(SemesterPlanner::new(universe, structure, &config)?.plan())
}

/// Replan the same curriculum once per capacity, in the order given.
///
/// All capacities are validated before any run starts.
pub fn compare_capacities(
    universe: &CourseUniverse,
    structure: &PrerequisiteStructure,
    capacities: &[i64],
    verbosity: u8,
) -> Result<Vec<(i64, PlanOutcome)>, PlannerError> {
    let planners = capacities
        .iter()
        .map(|&cap| {
            let config = PlannerConfig {
                max_per_semester: cap,
                verbosity,
            };
            SemesterPlanner::new(universe, structure, &config).map(|p| (cap, p))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(planners
        .into_iter()
        .map(|(cap, planner)| (cap, planner.plan()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::is_eligible;
    use crate::models::{Plan, PrerequisiteGroup};

    fn curriculum(entries: Vec<(CourseId, Vec<PrerequisiteGroup>)>) -> PrerequisiteStructure {
        entries.into_iter().collect()
    }

    /// A small engineering-style curriculum with AND-of-OR prerequisites.
    fn sample_curriculum() -> PrerequisiteStructure {
        curriculum(vec![
            (1, vec![]),
            (2, vec![]),
            (3, vec![]),
            (4, vec![vec![1]]),
            (5, vec![vec![1, 2]]),
            (6, vec![vec![4], vec![3]]),
            (7, vec![vec![5, 6]]),
            (8, vec![vec![2]]),
            (9, vec![vec![6], vec![8]]),
            (10, vec![vec![7], vec![9]]),
            (11, vec![]),
            (12, vec![vec![10, 11]]),
        ])
    }

    fn assert_valid_plan(
        structure: &PrerequisiteStructure,
        universe: &CourseUniverse,
        plan: &Plan,
        cap: usize,
    ) {
        let mut seen = ScheduledSet::default();
        for semester in plan.iter() {
            assert!(!semester.is_empty());
            assert!(semester.len() <= cap);
            // Prerequisites must be satisfied by strictly earlier semesters
            for &course in semester {
                assert!(is_eligible(course, structure, &seen));
            }
            for &course in semester {
                assert!(seen.insert(course), "course {} scheduled twice", course);
            }
        }
        assert_eq!(seen.len(), universe.len());
        assert!(universe.iter().all(|c| seen.contains(&c)));
    }

    #[test]
    fn test_linear_chain() {
        let structure = curriculum(vec![(1, vec![]), (2, vec![vec![1]]), (3, vec![vec![2]])]);
        let universe = structure.course_universe();

        let outcome = plan_semesters(&universe, &structure, 5).unwrap();

        assert!(outcome.is_completed());
        assert_eq!(outcome.plan().semesters(), &[vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_linear_chain_with_implicit_root() {
        // Course 1 has no entry, so it is listed only in the universe
        let structure = curriculum(vec![(2, vec![vec![1]]), (3, vec![vec![2]])]);
        let universe: CourseUniverse = [1, 2, 3].into_iter().collect();

        let plan = plan_semesters(&universe, &structure, 5)
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(plan.semesters(), &[vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_independent_courses_fill_capacity() {
        let structure = curriculum((1..=7).map(|id| (id, vec![])).collect());
        let universe = structure.course_universe();

        let outcome = plan_semesters(&universe, &structure, 3).unwrap();

        assert_eq!(
            outcome.plan().semesters(),
            &[vec![1, 2, 3], vec![4, 5, 6], vec![7]]
        );
    }

    #[test]
    fn test_universe_order_drives_selection() {
        let structure = curriculum((1..=4).map(|id| (id, vec![])).collect());
        let universe: CourseUniverse = [4, 2, 3, 1].into_iter().collect();

        let outcome = plan_semesters(&universe, &structure, 2).unwrap();

        assert_eq!(outcome.plan().semesters(), &[vec![4, 2], vec![3, 1]]);
    }

    #[test]
    fn test_cycle_stalls() {
        let structure = curriculum(vec![(1, vec![vec![2]]), (2, vec![vec![1]])]);
        let universe = structure.course_universe();

        let outcome = plan_semesters(&universe, &structure, 3).unwrap();

        assert_eq!(
            outcome,
            PlanOutcome::Stalled {
                plan: Plan::default(),
                scheduled_count: 0,
                total_count: 2,
                remaining: vec![1, 2],
            }
        );
        assert_eq!(
            outcome.into_result(),
            Err(PlannerError::UnsatisfiableGraph {
                scheduled: 0,
                total: 2
            })
        );
    }

    #[test]
    fn test_partial_progress_before_stall() {
        // 1 and 2 plan fine; 3 has an empty group; 4 depends on 3
        let structure = curriculum(vec![
            (1, vec![]),
            (2, vec![vec![1]]),
            (3, vec![vec![]]),
            (4, vec![vec![3]]),
        ]);
        let universe = structure.course_universe();

        let outcome = plan_semesters(&universe, &structure, 4).unwrap();

        match outcome {
            PlanOutcome::Stalled {
                plan,
                scheduled_count,
                total_count,
                remaining,
            } => {
                assert_eq!(plan.semesters(), &[vec![1], vec![2]]);
                assert_eq!(scheduled_count, 2);
                assert_eq!(total_count, 4);
                assert_eq!(remaining, vec![3, 4]);
            }
            other => panic!("expected stall, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_prerequisite_stalls() {
        let structure = curriculum(vec![(1, vec![]), (2, vec![vec![99]])]);
        let universe = structure.course_universe();

        let outcome = plan_semesters(&universe, &structure, 2).unwrap();

        assert!(!outcome.is_completed());
        assert_eq!(outcome.scheduled_count(), 1);
        assert_eq!(outcome.total_count(), 2);
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        let structure = curriculum(vec![(1, vec![])]);
        let universe = structure.course_universe();

        assert_eq!(
            plan_semesters(&universe, &structure, 0),
            Err(PlannerError::InvalidCapacity(0))
        );
        assert_eq!(
            plan_semesters(&universe, &structure, -3),
            Err(PlannerError::InvalidCapacity(-3))
        );
    }

    #[test]
    fn test_empty_universe_completes_immediately() {
        let structure = PrerequisiteStructure::new();
        let universe = structure.course_universe();

        let outcome = plan_semesters(&universe, &structure, 1).unwrap();

        assert_eq!(outcome, PlanOutcome::Completed(Plan::default()));
    }

    #[test]
    fn test_plan_is_repeatable() {
        let structure = sample_curriculum();
        let universe = structure.course_universe();
        let planner =
            SemesterPlanner::new(&universe, &structure, &PlannerConfig::with_capacity(3)).unwrap();

        assert_eq!(planner.plan(), planner.plan());
    }

    #[test]
    fn test_sample_curriculum_is_valid_for_every_capacity() {
        let structure = sample_curriculum();
        let universe = structure.course_universe();

        for cap in 1..=12 {
            let plan = plan_semesters(&universe, &structure, cap)
                .unwrap()
                .into_result()
                .unwrap();
            assert_valid_plan(&structure, &universe, &plan, cap as usize);
        }
    }

    #[test]
    fn test_semesters_full_unless_frontier_smaller() {
        let structure = sample_curriculum();
        let universe = structure.course_universe();
        let cap = 3;

        let plan = plan_semesters(&universe, &structure, cap)
            .unwrap()
            .into_result()
            .unwrap();

        // Replay the run: a short semester means the frontier itself was short
        let mut seen = ScheduledSet::default();
        for semester in plan.iter() {
            let frontier_len = universe
                .iter()
                .filter(|c| !seen.contains(c) && is_eligible(*c, &structure, &seen))
                .count();
            assert_eq!(semester.len(), frontier_len.min(cap as usize));
            seen.extend(semester.iter().copied());
        }
    }

    #[test]
    fn test_more_capacity_never_adds_semesters() {
        let structure = sample_curriculum();
        let universe = structure.course_universe();

        let outcomes =
            compare_capacities(&universe, &structure, &[1, 2, 3, 4, 5, 6, 12], 0).unwrap();
        let counts: Vec<usize> = outcomes
            .iter()
            .map(|(_, outcome)| outcome.plan().semester_count())
            .collect();

        assert!(counts.windows(2).all(|w| w[1] <= w[0]), "{:?}", counts);
        assert_eq!(counts[0], 12);
    }

    #[test]
    fn test_compare_capacities_validates_all_first() {
        let structure = sample_curriculum();
        let universe = structure.course_universe();

        assert_eq!(
            compare_capacities(&universe, &structure, &[3, 0, 5], 0),
            Err(PlannerError::InvalidCapacity(0))
        );
    }

    #[test]
    fn test_parallel_runs_are_independent() {
        let structure = sample_curriculum();
        let universe = structure.course_universe();
        let expected: Vec<PlanOutcome> = (1..=4)
            .map(|cap| plan_semesters(&universe, &structure, cap).unwrap())
            .collect();

        let results: Vec<PlanOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=4)
                .map(|cap| {
                    let (universe, structure) = (&universe, &structure);
                    scope.spawn(move || plan_semesters(universe, structure, cap).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results, expected);
    }
}
