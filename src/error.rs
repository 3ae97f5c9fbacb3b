//! Error types.
//!
//! Structural failures are detected before any numeric pass runs and are
//! always surfaced to the caller. The engine is deterministic, so retrying
//! the same input reproduces the same error.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for scheduling operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Which of the three PERT estimates a duration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateField {
    /// Best-case estimate.
    Optimistic,
    /// Normal-conditions estimate.
    MostLikely,
    /// Worst-case estimate.
    Pessimistic,
    /// PERT mean derived from the three estimates.
    Expected,
    /// Earliest finish accumulated along the dependency chain.
    EarliestFinish,
}

impl fmt::Display for EstimateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optimistic => "optimistic",
            Self::MostLikely => "most likely",
            Self::Pessimistic => "pessimistic",
            Self::Expected => "expected",
            Self::EarliestFinish => "earliest finish",
        })
    }
}

/// A structural validation failure.
///
/// Every variant names the offending task by ordinal index and name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// A dependency index points outside `[0, len)`.
    #[error("task {task} ('{name}') depends on unknown task index {dependency} (plan has {len} tasks)")]
    InvalidDependencyReference {
        /// Index of the task holding the bad reference.
        task: usize,
        /// Name of that task.
        name: String,
        /// The out-of-range index.
        dependency: usize,
        /// Number of tasks in the plan.
        len: usize,
    },

    /// The dependency graph has no topological order.
    #[error("circular dependency detected involving task {task} ('{name}')")]
    CyclicDependency {
        /// A task lying on the cycle.
        task: usize,
        /// Name of that task.
        name: String,
        /// One concrete cycle, in dependency order, starting at `task`.
        cycle: Vec<usize>,
    },

    /// An estimate is zero, negative or not finite.
    #[error("task {task} ('{name}') has an invalid {field} duration: {value}")]
    InvalidDuration {
        /// Index of the task.
        task: usize,
        /// Name of the task.
        name: String,
        /// Which estimate is invalid.
        field: EstimateField,
        /// The rejected value.
        value: f64,
    },
}

/// Fieldless error category, for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleErrorKind {
    /// See [`ScheduleError::InvalidDependencyReference`].
    InvalidDependencyReference,
    /// See [`ScheduleError::CyclicDependency`].
    CyclicDependency,
    /// See [`ScheduleError::InvalidDuration`].
    InvalidDuration,
}

impl ScheduleError {
    /// Error category.
    pub fn kind(&self) -> ScheduleErrorKind {
        match self {
            Self::InvalidDependencyReference { .. } => ScheduleErrorKind::InvalidDependencyReference,
            Self::CyclicDependency { .. } => ScheduleErrorKind::CyclicDependency,
            Self::InvalidDuration { .. } => ScheduleErrorKind::InvalidDuration,
        }
    }

    /// Ordinal index of the offending task.
    pub fn task_index(&self) -> usize {
        match self {
            Self::InvalidDependencyReference { task, .. }
            | Self::CyclicDependency { task, .. }
            | Self::InvalidDuration { task, .. } => *task,
        }
    }
}

/// Rejected structural edit to a plan. The plan is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanEditError {
    /// The edit addressed a position past the end of the task list.
    #[error("no task at index {index} (plan has {len} tasks)")]
    TaskNotFound {
        /// Requested position.
        index: usize,
        /// Number of tasks in the plan.
        len: usize,
    },

    /// The edited task list would not schedule.
    #[error(transparent)]
    Invalid(#[from] ScheduleError),
}

/// Failure to turn generated text into candidate tasks.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// No JSON array could be located in the text.
    #[error("no task list found in generated text")]
    NoTaskList,

    /// The located array is not valid JSON.
    #[error("malformed task list: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Pattern compilation failed.
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// The array held no usable task entries.
    #[error("task list contains no usable tasks")]
    Empty,
}
