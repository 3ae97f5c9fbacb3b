//! Full scheduling pass.
//!
//! # Algorithm
//!
//! 1. Build the dependency graph (rejects unknown references).
//! 2. Topologically sort it (rejects cycles).
//! 3. Validate estimates (rejects non-positive durations).
//! 4. Compute PERT expected durations.
//! 5. Run CPM forward/backward passes.
//! 6. Reject a chain whose accumulated finish overflows.
//! 7. Map offsets onto calendar dates.
//!
//! All validation happens before any numeric pass. The scheduler holds only
//! immutable configuration, so one instance can serve any number of
//! threads and plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calendar::CalendarMapper;
use super::cpm;
use crate::error::{EstimateField, ScheduleError, ScheduleResult};
use crate::graph;
use crate::models::{Task, TaskSchedule};
use crate::validation::validate_durations;

/// Default tolerance for treating slack as zero (days).
pub const ZERO_SLACK_TOLERANCE: f64 = 1e-6;

/// Scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Slack at or below this magnitude counts as zero.
    pub zero_slack_tolerance: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            zero_slack_tolerance: ZERO_SLACK_TOLERANCE,
        }
    }
}

impl SchedulerConfig {
    /// Sets the zero-slack tolerance.
    pub fn with_zero_slack_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_slack_tolerance = tolerance;
        self
    }
}

/// Result of a successful scheduling pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Input tasks, in input order, with timing populated.
    pub tasks: Vec<Task>,
    /// One critical chain of task positions, in dependency order.
    pub critical_path: Vec<usize>,
    /// Max earliest finish (days).
    pub total_duration: f64,
    /// Anchor the calendar dates were computed from.
    pub plan_start: DateTime<Utc>,
}

/// CPM/PERT scheduler.
///
/// # Example
///
/// ```
/// use u_pert::models::Task;
/// use u_pert::scheduler::Scheduler;
///
/// let tasks = vec![
///     Task::new("Design").with_duration(5.0),
///     Task::new("Build").with_duration(3.0).with_dependency(0),
/// ];
/// let outcome = Scheduler::new().compute_schedule(&tasks, None).unwrap();
/// assert_eq!(outcome.critical_path, vec![0, 1]);
/// assert!((outcome.total_duration - 8.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scheduler with the given configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules a task-list snapshot.
    ///
    /// `plan_start` anchors calendar dates; `None` means now. An empty list
    /// yields an empty schedule with zero duration.
    ///
    /// # Errors
    /// `InvalidDependencyReference`, `CyclicDependency` or `InvalidDuration`.
    pub fn compute_schedule(
        &self,
        tasks: &[Task],
        plan_start: Option<DateTime<Utc>>,
    ) -> ScheduleResult<ScheduleOutcome> {
        let calendar = CalendarMapper::anchored_or_now(plan_start);
        debug!(tasks = tasks.len(), "starting scheduling pass");

        let (graph, order) = graph::build(tasks)?;
        validate_durations(tasks)?;

        let durations: Vec<f64> = tasks.iter().map(Task::expected_duration).collect();
        let analysis = cpm::analyze(
            &graph,
            &order,
            &durations,
            self.config.zero_slack_tolerance,
        );
        if let Some(&task) = order
            .iter()
            .find(|&&i| !analysis.timings[i].earliest_finish.is_finite())
        {
            return Err(ScheduleError::InvalidDuration {
                task,
                name: tasks[task].name.clone(),
                field: EstimateField::EarliestFinish,
                value: analysis.timings[task].earliest_finish,
            });
        }

        let scheduled: Vec<Task> = tasks
            .iter()
            .zip(&analysis.timings)
            .map(|(task, timing)| {
                let (start_date, end_date) =
                    calendar.span(timing.earliest_start, timing.earliest_finish);
                let mut task = task.clone();
                task.schedule = Some(TaskSchedule {
                    expected_duration: timing.duration,
                    earliest_start: timing.earliest_start,
                    earliest_finish: timing.earliest_finish,
                    latest_start: timing.latest_start,
                    latest_finish: timing.latest_finish,
                    slack: timing.slack,
                    is_on_critical_path: timing.is_critical,
                    start_date,
                    end_date,
                });
                task
            })
            .collect();

        debug!(
            tasks = scheduled.len(),
            total_duration = analysis.total_duration,
            critical_path_len = analysis.critical_path.len(),
            "scheduling pass complete"
        );

        Ok(ScheduleOutcome {
            tasks: scheduled,
            critical_path: analysis.critical_path,
            total_duration: analysis.total_duration,
            plan_start: calendar.anchor(),
        })
    }
}

/// Schedules with the default configuration.
///
/// Shorthand for `Scheduler::new().compute_schedule(tasks, plan_start)`.
pub fn compute_schedule(
    tasks: &[Task],
    plan_start: Option<DateTime<Utc>>,
) -> ScheduleResult<ScheduleOutcome> {
    Scheduler::new().compute_schedule(tasks, plan_start)
}
