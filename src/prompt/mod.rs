mod engine;
mod templates;

pub use engine::TeraEngine;
pub use templates::{PLANNER_TEMPLATE, PromptTemplates, SOLVER_TEMPLATE};
