//! ReWOO execution core: parse a plan once, run its steps in order with
//! evidence substitution, then solve.

mod binder;
mod controller;
mod parser;
mod planner;
mod solver;
mod substitution;
mod types;
mod worker;

pub use binder::{bind, split_args};
pub use controller::{Engine, EngineOptions};
pub use parser::{PLAN_MARKER, PlanParser, VARIABLE_PREFIX};
pub use planner::{Planner, tool_catalog};
pub use solver::{Solver, transcript};
pub use substitution::{ordered_keys, substitute};
pub use types::{EvidenceStore, ExecutionCursor, Plan, RunResult, Step, Task};
pub use worker::{StepOutput, Worker};
