//! Python bindings, built with the `python` feature.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

// Note: We use std HashMap here for PyO3 interface compatibility

use crate::config::PlannerConfig;
use crate::models::{
    CourseId, CourseUniverse, PlanOutcome, PrerequisiteGroup, PrerequisiteStructure,
};
use crate::scheduler::{PlannerError, SemesterPlanner};

fn to_py_err(err: PlannerError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Build the curriculum from Python inputs. Without an explicit universe the
/// key set of `prerequisites` is used, in ascending id order.
fn build_curriculum(
    prerequisites: HashMap<CourseId, Vec<PrerequisiteGroup>>,
    universe: Option<Vec<CourseId>>,
) -> (CourseUniverse, PrerequisiteStructure) {
    let structure: PrerequisiteStructure = prerequisites.into_iter().collect();
    let universe = match universe {
        Some(ids) => ids.into_iter().collect(),
        None => structure.course_universe(),
    };
    (universe, structure)
}

/// Planner configuration (PyO3 wrapper).
#[pyclass(name = "PlannerConfig")]
#[derive(Clone, Debug)]
pub struct PyPlannerConfig {
    #[pyo3(get, set)]
    pub max_per_semester: i64,
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl PyPlannerConfig {
    #[new]
    #[pyo3(signature = (max_per_semester=None, verbosity=None))]
    fn new(max_per_semester: Option<i64>, verbosity: Option<u8>) -> Self {
        let defaults = PlannerConfig::default();
        Self {
            max_per_semester: max_per_semester.unwrap_or(defaults.max_per_semester),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PlannerConfig(max_per_semester={}, verbosity={})",
            self.max_per_semester, self.verbosity
        )
    }
}

impl From<&PyPlannerConfig> for PlannerConfig {
    fn from(config: &PyPlannerConfig) -> Self {
        Self {
            max_per_semester: config.max_per_semester,
            verbosity: config.verbosity,
        }
    }
}

/// Outcome of a planning run.
#[pyclass(name = "PlanResult")]
#[derive(Clone, Debug)]
pub struct PyPlanResult {
    #[pyo3(get)]
    pub semesters: Vec<Vec<CourseId>>,
    #[pyo3(get)]
    pub completed: bool,
    #[pyo3(get)]
    pub scheduled_count: usize,
    #[pyo3(get)]
    pub total_count: usize,
    #[pyo3(get)]
    pub remaining: Vec<CourseId>,
}

#[pymethods]
impl PyPlanResult {
    fn __len__(&self) -> usize {
        self.semesters.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "PlanResult(semesters={}, completed={}, scheduled={}/{})",
            self.semesters.len(),
            self.completed,
            self.scheduled_count,
            self.total_count
        )
    }
}

impl From<PlanOutcome> for PyPlanResult {
    fn from(outcome: PlanOutcome) -> Self {
        let completed = outcome.is_completed();
        let scheduled_count = outcome.scheduled_count();
        let total_count = outcome.total_count();
        match outcome {
            PlanOutcome::Completed(plan) => Self {
                semesters: plan.into_semesters(),
                completed,
                scheduled_count,
                total_count,
                remaining: Vec::new(),
            },
            PlanOutcome::Stalled {
                plan, remaining, ..
            } => Self {
                semesters: plan.into_semesters(),
                completed,
                scheduled_count,
                total_count,
                remaining,
            },
        }
    }
}

/// Plan a curriculum semester by semester.
///
/// # Arguments
/// * `prerequisites` - Dict mapping course id to a list of groups (AND),
///   each a list of alternatives (OR)
/// * `config` - Planner configuration (capacity, verbosity)
/// * `universe` - Courses to plan, in selection order (defaults to the keys of `prerequisites`)
///
/// # Raises
/// * ValueError if the capacity is not positive
#[pyfunction]
#[pyo3(name = "plan_semesters", signature = (prerequisites, config=None, universe=None))]
fn py_plan_semesters(
    prerequisites: HashMap<CourseId, Vec<PrerequisiteGroup>>,
    config: Option<PyPlannerConfig>,
    universe: Option<Vec<CourseId>>,
) -> PyResult<PyPlanResult> {
    let config = config
        .as_ref()
        .map(PlannerConfig::from)
        .unwrap_or_default();
    let (universe, structure) = build_curriculum(prerequisites, universe);
    let planner = SemesterPlanner::new(&universe, &structure, &config).map_err(to_py_err)?;
    Ok(planner.plan().into())
}

/// Plan the same curriculum once per capacity.
///
/// # Returns
/// * List of (capacity, PlanResult) tuples in the order given
#[pyfunction]
#[pyo3(name = "compare_capacities", signature = (prerequisites, capacities, universe=None))]
fn py_compare_capacities(
    prerequisites: HashMap<CourseId, Vec<PrerequisiteGroup>>,
    capacities: Vec<i64>,
    universe: Option<Vec<CourseId>>,
) -> PyResult<Vec<(i64, PyPlanResult)>> {
    let (universe, structure) = build_curriculum(prerequisites, universe);
    let results = crate::scheduler::compare_capacities(&universe, &structure, &capacities, 0)
        .map_err(to_py_err)?;
    Ok(results
        .into_iter()
        .map(|(cap, outcome)| (cap, outcome.into()))
        .collect())
}

/// Check a curriculum for problems that would stall planning.
///
/// # Returns
/// * List of problem descriptions (empty if the curriculum is sound)
#[pyfunction]
#[pyo3(name = "validate_curriculum", signature = (prerequisites, universe=None))]
fn py_validate_curriculum(
    prerequisites: HashMap<CourseId, Vec<PrerequisiteGroup>>,
    universe: Option<Vec<CourseId>>,
) -> Vec<String> {
    let (universe, structure) = build_curriculum(prerequisites, universe);
    match crate::validation::validate_curriculum(&universe, &structure) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.into_iter().map(|e| e.message).collect(),
    }
}

/// The semester_planner Python module.
#[pymodule]
fn semester_planner(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlannerConfig>()?;
    m.add_class::<PyPlanResult>()?;

    m.add_function(wrap_pyfunction!(py_plan_semesters, m)?)?;
    m.add_function(wrap_pyfunction!(py_compare_capacities, m)?)?;
    m.add_function(wrap_pyfunction!(py_validate_curriculum, m)?)?;

    Ok(())
}
