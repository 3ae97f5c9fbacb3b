//! Scheduling domain models.
//!
//! Provides the data types for project plans: tasks with three-point
//! estimates and precedence constraints, the plan that owns them, and the
//! timing a scheduling pass attaches to each task.
//!
//! # Domain Mappings
//!
//! | u-pert | Software | Construction | Events |
//! |--------|----------|--------------|--------|
//! | Plan | Release | Building project | Conference |
//! | Task | Story/Epic | Work package | Preparation step |
//! | Dependency | Blocked-by | Finish-to-start | Prerequisite |

mod pert;
mod plan;
mod task;

pub use pert::{path_std_dev, PertEstimate};
pub use plan::{Plan, PlanEditResult};
pub use task::{Task, TaskSchedule};
