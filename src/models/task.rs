//! Task model.
//!
//! A task is one unit of project work with a three-point duration estimate
//! and precedence constraints on other tasks of the same plan.
//!
//! # Identity
//! Within a plan a task is addressed by its ordinal position. Dependency
//! references are positions into the same task list, so callers must keep
//! the list order stable between calls. Structural edits go through
//! [`Plan`](super::Plan), which keeps references consistent.
//!
//! # Time Representation
//! Durations and CPM offsets are in days (floating point) relative to the
//! plan start (t=0). Calendar dates are UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PertEstimate;

/// A task to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Storage identifier, opaque to the engine.
    #[serde(default)]
    pub id: Option<u64>,
    /// Human-readable name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Three-point duration estimate (days).
    pub estimate: PertEstimate,
    /// Positions of tasks that must finish before this one starts.
    #[serde(default)]
    pub dependencies: Vec<usize>,
    /// Whether the work is done.
    #[serde(default)]
    pub is_complete: bool,
    /// Timing from the last successful scheduling pass.
    ///
    /// `None` until scheduled, and cleared by any structural edit.
    #[serde(default)]
    pub schedule: Option<TaskSchedule>,
}

/// CPM and calendar results for one task.
///
/// All offsets are days from the plan start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSchedule {
    /// PERT expected duration used as the node weight.
    pub expected_duration: f64,
    /// Earliest start (ES).
    pub earliest_start: f64,
    /// Earliest finish (EF = ES + duration).
    pub earliest_finish: f64,
    /// Latest start (LS = LF - duration).
    pub latest_start: f64,
    /// Latest finish (LF).
    pub latest_finish: f64,
    /// Total float: LS - ES.
    pub slack: f64,
    /// Whether slack is zero within tolerance.
    pub is_on_critical_path: bool,
    /// Calendar start: anchor + ES days.
    pub start_date: DateTime<Utc>,
    /// Calendar end: anchor + EF days.
    pub end_date: DateTime<Utc>,
}

impl Task {
    /// Creates a task with a default one-day estimate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            estimate: PertEstimate::default(),
            dependencies: Vec::new(),
            is_complete: false,
            schedule: None,
        }
    }

    /// Sets the storage identifier.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the three-point estimate.
    pub fn with_estimate(mut self, optimistic: f64, most_likely: f64, pessimistic: f64) -> Self {
        self.estimate = PertEstimate::new(optimistic, most_likely, pessimistic);
        self
    }

    /// Sets a deterministic duration (O = M = P).
    pub fn with_duration(mut self, days: f64) -> Self {
        self.estimate = PertEstimate::fixed(days);
        self
    }

    /// Adds a dependency on the task at `index`. Repeats are ignored.
    pub fn with_dependency(mut self, index: usize) -> Self {
        if !self.dependencies.contains(&index) {
            self.dependencies.push(index);
        }
        self
    }

    /// Replaces the dependency list.
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = usize>) -> Self {
        self.dependencies.clear();
        for dep in deps {
            if !self.dependencies.contains(&dep) {
                self.dependencies.push(dep);
            }
        }
        self
    }

    /// Marks the task complete.
    pub fn completed(mut self) -> Self {
        self.is_complete = true;
        self
    }

    /// PERT expected duration (days), always derived from the estimate.
    pub fn expected_duration(&self) -> f64 {
        self.estimate.expected()
    }

    /// Whether a scheduling pass has populated timing.
    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    /// Slack from the last pass.
    pub fn slack(&self) -> Option<f64> {
        self.schedule.as_ref().map(|s| s.slack)
    }

    /// Whether the last pass put this task on the critical path.
    pub fn is_on_critical_path(&self) -> bool {
        self.schedule
            .as_ref()
            .is_some_and(|s| s.is_on_critical_path)
    }

    /// Drops stale timing.
    pub fn clear_schedule(&mut self) {
        self.schedule = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("Write report")
            .with_id(42)
            .with_description("Quarterly numbers")
            .with_estimate(1.0, 2.0, 9.0)
            .with_dependency(0)
            .with_dependency(2)
            .with_dependency(0);

        assert_eq!(task.id, Some(42));
        assert_eq!(task.name, "Write report");
        assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(task.dependencies, vec![0, 2]);
        assert!(!task.is_complete);
        assert!(!task.is_scheduled());
        assert!((task.expected_duration() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_expected_duration_follows_estimate() {
        let mut task = Task::new("A").with_duration(4.0);
        assert!((task.expected_duration() - 4.0).abs() < 1e-12);
        task.estimate = PertEstimate::new(2.0, 5.0, 8.0);
        assert!((task.expected_duration() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_with_dependencies_dedups() {
        let task = Task::new("B").with_dependencies([3, 1, 3]);
        assert_eq!(task.dependencies, vec![3, 1]);
    }

    #[test]
    fn test_unscheduled_accessors() {
        let task = Task::new("C").completed();
        assert!(task.is_complete);
        assert_eq!(task.slack(), None);
        assert!(!task.is_on_critical_path());
    }

    #[test]
    fn test_task_deserialize_defaults() {
        let json = r#"{
            "name": "Draft",
            "estimate": { "optimistic": 1.0, "most_likely": 2.0, "pessimistic": 3.0 }
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.name, "Draft");
        assert!(task.dependencies.is_empty());
        assert!(task.schedule.is_none());
        assert!(!task.is_complete);
    }
}
