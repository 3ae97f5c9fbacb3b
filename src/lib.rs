//! Project scheduling engine for the U-Engine ecosystem.
//!
//! Turns a goal's task list (three-point estimates plus precedence
//! constraints) into a timed schedule with a critical path, then derives
//! schedule-health insights from it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Plan`, `Task`, `PertEstimate`, `TaskSchedule`
//! - **`graph`**: Dependency graph, deterministic topological order, cycle recovery
//! - **`validation`**: Input integrity checks (dangling references, DAG cycles, durations)
//! - **`scheduler`**: PERT estimation, CPM forward/backward passes, calendar mapping
//! - **`insights`**: Slack statistics, deadline buffer, risk and recommendations
//! - **`intake`**: Lenient parsing of generated candidate task lists
//!
//! # Example
//!
//! ```
//! use u_pert::models::{Plan, Task};
//! use u_pert::scheduler::Scheduler;
//! use u_pert::insights::InsightThresholds;
//!
//! let mut plan = Plan::new("Ship v1").with_tasks(vec![
//!     Task::new("Design").with_estimate(2.0, 3.0, 6.0),
//!     Task::new("Build").with_estimate(4.0, 5.0, 9.0).with_dependency(0),
//!     Task::new("Docs").with_duration(1.0).with_dependency(0),
//! ]);
//! plan.schedule(&Scheduler::new()).unwrap();
//!
//! assert_eq!(plan.critical_path(), &[0, 1]);
//! let report = plan.insights(&InsightThresholds::default());
//! assert_eq!(report.critical_path, vec!["Design", "Build"]);
//! ```
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-path planning and scheduling"
//! - Malcolm et al. (1959), "Application of a technique for R&D program evaluation"
//! - Kahn (1962), "Topological sorting of large networks"

pub mod error;
pub mod graph;
pub mod insights;
pub mod intake;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{ScheduleError, ScheduleErrorKind, ScheduleResult};
pub use insights::compute_insights;
pub use scheduler::compute_schedule;
pub use validation::{validate_dependencies, validate_input};
