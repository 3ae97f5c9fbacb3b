//! Input validation for scheduling.
//!
//! Checks structural integrity of a task list before any numeric pass.
//! Detects:
//! - Dependency references outside the task list
//! - Circular dependencies (DAG validation)
//! - Non-positive or non-finite duration estimates
//!
//! Two entry points:
//! - [`validate_dependencies`] fails fast on the first structural problem
//!   with the dependency set, for edit-validation steps.
//! - [`validate_input`] reports every problem it can find.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use tracing::warn;

use crate::error::{ScheduleError, ScheduleResult};
use crate::graph::DependencyGraph;
use crate::models::Task;

/// Validation result carrying every detected problem.
pub type ValidationResult = Result<(), Vec<ScheduleError>>;

/// Checks dependency references and acyclicity.
///
/// Durations are not inspected. Returns the first problem found: bad
/// references are reported before cycles.
pub fn validate_dependencies(tasks: &[Task]) -> ScheduleResult<()> {
    let graph = DependencyGraph::from_tasks(tasks)?;
    graph.topological_order(tasks)?;
    Ok(())
}

/// Checks every task's durations.
///
/// Also logs a warning for estimates not ordered `O <= M <= P`, which are
/// accepted and computed as given.
pub fn validate_durations(tasks: &[Task]) -> ScheduleResult<()> {
    for (i, task) in tasks.iter().enumerate() {
        task.estimate.validate(i, &task.name)?;
        if !task.estimate.is_ordered() {
            warn!(
                task = i,
                name = %task.name,
                optimistic = task.estimate.optimistic,
                most_likely = task.estimate.most_likely,
                pessimistic = task.estimate.pessimistic,
                "estimates out of order; computing as given"
            );
        }
    }
    Ok(())
}

/// Validates a task list, collecting all problems.
///
/// Checks:
/// 1. All dependency references point to existing tasks
/// 2. All duration estimates are positive and finite
/// 3. No circular dependencies (only checked when all references are valid)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let len = tasks.len();

    for (i, task) in tasks.iter().enumerate() {
        for &dep in &task.dependencies {
            if dep >= len {
                errors.push(ScheduleError::InvalidDependencyReference {
                    task: i,
                    name: task.name.clone(),
                    dependency: dep,
                    len,
                });
            }
        }
        if let Err(e) = task.estimate.validate(i, &task.name) {
            errors.push(e);
        }
    }

    let references_ok = !errors
        .iter()
        .any(|e| matches!(e, ScheduleError::InvalidDependencyReference { .. }));
    if references_ok {
        if let Err(e) = validate_dependencies(tasks) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleErrorKind;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("Research").with_estimate(1.0, 2.0, 3.0),
            Task::new("Draft")
                .with_estimate(2.0, 3.0, 5.0)
                .with_dependency(0),
            Task::new("Review")
                .with_estimate(0.5, 1.0, 2.0)
                .with_dependency(1),
        ]
    }

    #[test]
    fn test_valid_input() {
        let tasks = sample_tasks();
        assert!(validate_input(&tasks).is_ok());
        assert!(validate_dependencies(&tasks).is_ok());
        assert!(validate_durations(&tasks).is_ok());
    }

    #[test]
    fn test_invalid_reference() {
        let mut tasks = sample_tasks();
        tasks[2].dependencies.push(7);

        let err = validate_dependencies(&tasks).unwrap_err();
        assert_eq!(err.kind(), ScheduleErrorKind::InvalidDependencyReference);
        assert_eq!(err.task_index(), 2);
    }

    #[test]
    fn test_cyclic_dependency() {
        // Research -> Draft -> Review -> Research (cycle)
        let mut tasks = sample_tasks();
        tasks[0].dependencies.push(2);

        let err = validate_dependencies(&tasks).unwrap_err();
        assert_eq!(err.kind(), ScheduleErrorKind::CyclicDependency);
    }

    #[test]
    fn test_dependencies_ignore_durations() {
        let mut tasks = sample_tasks();
        tasks[1].estimate.most_likely = 0.0;
        assert!(validate_dependencies(&tasks).is_ok());
        assert!(validate_durations(&tasks).is_err());
    }

    #[test]
    fn test_inverted_estimate_accepted() {
        let tasks = vec![
            Task::new("Odd").with_estimate(5.0, 3.0, 1.0),
            Task::new("Peaked").with_estimate(1.0, 4.0, 3.0),
        ];
        assert!(!tasks[1].estimate.is_ordered());
        assert!(validate_durations(&tasks).is_ok());
    }

    #[test]
    fn test_overflowing_expected_rejected() {
        let tasks = vec![
            Task::new("Fine").with_duration(2.0),
            Task::new("Huge").with_estimate(1.0, 1e308, 1e308),
        ];
        let err = validate_durations(&tasks).unwrap_err();
        assert_eq!(err.kind(), ScheduleErrorKind::InvalidDuration);
        assert_eq!(err.task_index(), 1);

        let errors = validate_input(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new("A").with_estimate(-1.0, 2.0, 3.0),
            Task::new("B").with_dependencies([9, 10]),
        ];

        let errors = validate_input(&tasks).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind() == ScheduleErrorKind::InvalidDependencyReference)
                .count(),
            2
        );
        assert!(errors
            .iter()
            .any(|e| e.kind() == ScheduleErrorKind::InvalidDuration));
    }

    #[test]
    fn test_cycle_and_duration_reported_together() {
        let tasks = vec![
            Task::new("A").with_dependency(1),
            Task::new("B").with_dependency(0).with_duration(0.0),
        ];
        let errors = validate_input(&tasks).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .any(|e| e.kind() == ScheduleErrorKind::CyclicDependency));
    }

    #[test]
    fn test_empty_is_valid() {
        assert!(validate_input(&[]).is_ok());
        assert!(validate_dependencies(&[]).is_ok());
    }
}
