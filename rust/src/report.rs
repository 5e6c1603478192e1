//! Plain-text rendering of planning results.
//!
//! Only reads finished outcomes; nothing here feeds back into planning.

use std::fmt::Write;

use crate::catalog::CourseCatalog;
use crate::models::PlanOutcome;

/// Render a plan as a per-semester listing followed by a summary.
///
/// Courses missing from the catalog are listed by id and add no credits.
pub fn render_plan(outcome: &PlanOutcome, catalog: &CourseCatalog) -> String {
    let plan = outcome.plan();
    let mut out = String::new();
    let mut total_credits = 0u32;

    for (idx, semester) in plan.iter().enumerate() {
        let _ = writeln!(out, "Semester {}", idx + 1);
        for &course in semester {
            match catalog.get(course) {
                Some(info) => {
                    total_credits += info.credits;
                    let _ = writeln!(out, "  - {} ({})", info.name, info.code);
                }
                None => {
                    let _ = writeln!(out, "  - Course {}", course);
                }
            }
        }
        let _ = writeln!(out, "  Courses: {}", semester.len());
        out.push('\n');
    }

    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  Semesters: {}", plan.semester_count());
    let _ = writeln!(out, "  Courses: {}", plan.course_count());
    let _ = writeln!(out, "  Estimated credits: {}", total_credits);

    if let PlanOutcome::Stalled {
        scheduled_count,
        total_count,
        remaining,
        ..
    } = outcome
    {
        let _ = writeln!(
            out,
            "  Stalled: no eligible courses left (possible prerequisite cycle or bad data)"
        );
        let _ = writeln!(out, "  Scheduled: {}/{}", scheduled_count, total_count);
        let names: Vec<String> = remaining
            .iter()
            .map(|&id| match catalog.get(id) {
                Some(info) => info.code.clone(),
                None => id.to_string(),
            })
            .collect();
        let _ = writeln!(out, "  Remaining: {}", names.join(", "));
    }

    out
}

/// Render a capacity comparison, one line per capacity.
pub fn render_comparison(results: &[(i64, PlanOutcome)]) -> String {
    let mut out = String::new();
    for (cap, outcome) in results {
        match outcome {
            PlanOutcome::Completed(plan) => {
                let _ = writeln!(
                    out,
                    "{} per semester -> {} semesters",
                    cap,
                    plan.semester_count()
                );
            }
            PlanOutcome::Stalled {
                scheduled_count,
                total_count,
                ..
            } => {
                let _ = writeln!(
                    out,
                    "{} per semester -> stalled ({}/{} scheduled)",
                    cap, scheduled_count, total_count
                );
            }
        }
    }
    out
}
