//! Plan → execute pipeline
//!
//! The planner turns a task summary into an ordered phase plan via the
//! completion provider; the executor runs each phase's command and collects
//! the outcomes. Both are single-shot, stateless transformations.

pub mod executor;
pub mod planner;
pub mod types;

pub use executor::PlanExecutor;
pub use planner::{PlanError, TaskPlanner};
pub use types::{Phase, PhaseResult, Plan};
