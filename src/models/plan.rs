//! Plan model.
//!
//! A plan owns an ordered task list plus the schedule derived from it.
//! Dependency references are positions in that list, so the plan acts as
//! the arena: every structural edit is validated against the whole list and
//! rejected (leaving the plan untouched) if it would produce an unknown
//! reference or a cycle. Removing a task renumbers references so none
//! dangle.
//!
//! Derived fields (`total_duration`, `critical_path`, per-task timing) are
//! written only by [`Plan::schedule`] and cleared by every structural edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PertEstimate, Task};
use crate::error::{PlanEditError, ScheduleResult};
use crate::insights::{compute_insights, InsightThresholds, InsightsReport};
use crate::scheduler::Scheduler;
use crate::validation::validate_dependencies;

/// Result alias for plan edits.
pub type PlanEditResult<T> = Result<T, PlanEditError>;

/// A project plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Goal the plan works toward.
    pub goal: String,
    #[serde(default)]
    start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    deadline: Option<DateTime<Utc>>,
    tasks: Vec<Task>,
    #[serde(default)]
    total_duration: Option<f64>,
    #[serde(default)]
    critical_path: Vec<usize>,
}

impl Plan {
    /// Creates an empty plan for `goal`.
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            ..Self::default()
        }
    }

    /// Sets the task list without validation (builder use).
    ///
    /// Invalid lists are still caught by [`Plan::schedule`].
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self.invalidate();
        self
    }

    /// Sets the calendar anchor.
    pub fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.invalidate();
        self
    }

    /// Sets the deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Calendar anchor. `None` anchors each scheduling pass at "now".
    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Optional target completion date.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Moves the calendar anchor. Task dates depend on it, so the schedule
    /// is cleared.
    pub fn set_start_date(&mut self, start: Option<DateTime<Utc>>) {
        if self.start_date != start {
            self.start_date = start;
            self.invalidate();
        }
    }

    /// Sets or clears the deadline. Timing is unaffected.
    pub fn set_deadline(&mut self, deadline: Option<DateTime<Utc>>) {
        self.deadline = deadline;
    }

    /// Tasks in plan order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task at `index`.
    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the plan has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Project duration from the last pass (days).
    pub fn total_duration(&self) -> Option<f64> {
        self.total_duration
    }

    /// Critical chain from the last pass.
    pub fn critical_path(&self) -> &[usize] {
        &self.critical_path
    }

    /// Whether the derived fields reflect the current task list.
    pub fn is_scheduled(&self) -> bool {
        self.total_duration.is_some()
    }

    /// Clears all derived fields.
    pub fn invalidate(&mut self) {
        self.total_duration = None;
        self.critical_path.clear();
        for task in &mut self.tasks {
            task.clear_schedule();
        }
    }

    /// Runs a full scheduling pass and stores the result.
    ///
    /// On error the plan is left unscheduled.
    pub fn schedule(&mut self, scheduler: &Scheduler) -> ScheduleResult<()> {
        self.invalidate();
        let outcome = scheduler.compute_schedule(&self.tasks, self.start_date)?;
        self.tasks = outcome.tasks;
        self.total_duration = Some(outcome.total_duration);
        self.critical_path = outcome.critical_path;
        Ok(())
    }

    /// Derives health insights from the current schedule.
    pub fn insights(&self, thresholds: &InsightThresholds) -> InsightsReport {
        compute_insights(self, thresholds)
    }

    /// Replaces the whole task list (regeneration).
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> PlanEditResult<()> {
        validate_dependencies(&tasks)?;
        self.tasks = tasks;
        self.invalidate();
        Ok(())
    }

    /// Appends a task and returns its position.
    pub fn push_task(&mut self, task: Task) -> PlanEditResult<usize> {
        let mut candidate = self.tasks.clone();
        candidate.push(task);
        validate_dependencies(&candidate)?;
        self.tasks = candidate;
        self.invalidate();
        Ok(self.tasks.len() - 1)
    }

    /// Replaces the estimate of the task at `index`.
    pub fn update_estimate(&mut self, index: usize, estimate: PertEstimate) -> PlanEditResult<()> {
        self.check_index(index)?;
        estimate.validate(index, &self.tasks[index].name)?;
        self.tasks[index].estimate = estimate;
        self.invalidate();
        Ok(())
    }

    /// Replaces the dependency list of the task at `index`.
    pub fn set_dependencies(&mut self, index: usize, deps: Vec<usize>) -> PlanEditResult<()> {
        self.check_index(index)?;
        let mut candidate = self.tasks.clone();
        candidate[index] = candidate[index].clone().with_dependencies(deps);
        validate_dependencies(&candidate)?;
        self.tasks = candidate;
        self.invalidate();
        Ok(())
    }

    /// Sets the completion flag. Timing is unaffected, so the schedule stays.
    pub fn set_complete(&mut self, index: usize, complete: bool) -> PlanEditResult<()> {
        self.check_index(index)?;
        self.tasks[index].is_complete = complete;
        Ok(())
    }

    /// Renames the task at `index`. Timing is unaffected.
    pub fn rename_task(&mut self, index: usize, name: impl Into<String>) -> PlanEditResult<()> {
        self.check_index(index)?;
        self.tasks[index].name = name.into();
        Ok(())
    }

    /// Sets or clears the description of the task at `index`. Timing is
    /// unaffected.
    pub fn set_description(
        &mut self,
        index: usize,
        description: Option<String>,
    ) -> PlanEditResult<()> {
        self.check_index(index)?;
        self.tasks[index].description = description;
        Ok(())
    }

    /// Removes the task at `index`.
    ///
    /// References to it are dropped and references to later tasks shift
    /// down by one.
    pub fn remove_task(&mut self, index: usize) -> PlanEditResult<Task> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        for task in &mut self.tasks {
            task.dependencies.retain(|&d| d != index);
            for dep in &mut task.dependencies {
                if *dep > index {
                    *dep -= 1;
                }
            }
        }
        self.invalidate();
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> PlanEditResult<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(PlanEditError::TaskNotFound {
                index,
                len: self.tasks.len(),
            })
        }
    }
}
