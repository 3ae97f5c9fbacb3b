//! CPM/PERT scheduling.
//!
//! Turns a task list with three-point estimates and precedence constraints
//! into a fully timed schedule.
//!
//! # Pipeline
//!
//! Task list → dependency graph → PERT durations → CPM passes → calendar
//! dates. The pipeline is rerun in full after any edit; nothing is
//! recomputed incrementally.
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-path planning and scheduling"
//! - Malcolm et al. (1959), "Application of a technique for R&D program evaluation"

mod calendar;
mod cpm;
mod engine;

pub use calendar::CalendarMapper;
pub use engine::{
    compute_schedule, ScheduleOutcome, Scheduler, SchedulerConfig, ZERO_SLACK_TOLERANCE,
};
