use super::TeraEngine;
use crate::engine::Task;
use tera::Context;

const PLANNER_NAME: &str = "planner";
const SOLVER_NAME: &str = "solver";

/// Planner prompt. Context: `task`, `tools` (numbered catalog lines) and
/// `reasoning_tool`.
pub const PLANNER_TEMPLATE: &str = r#"For the following task, make plans that can solve the problem step by step. For each plan, indicate which external tool together with tool input to retrieve evidence. You can store the evidence into a variable #E that can be called by later tools. (Plan, #E1, Plan, #E2, Plan, ...)

Tools can be one of the following:
{{ tools }}

For example:
Task: Is the Slim Fit Jeans from order 12345 also available in black, size 34?

Plan: Look up order 12345 to find the exact product name. #E1 = OrderStatus[12345]
Plan: Extract the product name of the jeans from the order details. #E2 = {{ reasoning_tool }}[Which jeans product appears in #E1? Answer with the name only.]
Plan: Check stock for that product in black, size 34. #E3 = CheckInventory[#E2, black, 34]

Begin!
Each line must start with "Plan:" followed by the description, then the evidence variable assignment.
Format: Plan: <description> #E<number> = <ToolName>[<parameters>]
Separate multiple parameters with commas. Use only the tools listed above.
Do NOT use markdown formatting, bullet points, or numbered lists.

Task: {{ task }}"#;

/// Solver prompt. Context: `task` and `transcript` (resolved plan plus
/// evidence).
pub const SOLVER_TEMPLATE: &str = r#"Solve the following task. Below is a plan that was executed step by step, followed by the evidence each step produced. Some evidence may be incomplete, or may report that a tool failed; use it with care and say so when it prevents a full answer.

{{ transcript }}
Answer the task directly and concisely, using only the evidence above.

Task: {{ task }}
Response:"#;

/// Planner and solver prompt sources, rendered through Tera on each call.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    planner: String,
    solver: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            planner: PLANNER_TEMPLATE.to_string(),
            solver: SOLVER_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_planner(mut self, template: impl Into<String>) -> Self {
        self.planner = template.into();
        self
    }

    #[must_use]
    pub fn with_solver(mut self, template: impl Into<String>) -> Self {
        self.solver = template.into();
        self
    }

    pub fn planner_prompt(
        &self,
        task: &Task,
        catalog: &str,
        reasoning_tool: &str,
    ) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("task", task.as_str());
        ctx.insert("tools", catalog);
        ctx.insert("reasoning_tool", reasoning_tool);
        render(PLANNER_NAME, &self.planner, &ctx)
    }

    pub fn solver_prompt(&self, task: &Task, transcript: &str) -> anyhow::Result<String> {
        let mut ctx = Context::new();
        ctx.insert("task", task.as_str());
        ctx.insert("transcript", transcript);
        render(SOLVER_NAME, &self.solver, &ctx)
    }
}

fn render(name: &str, source: &str, ctx: &Context) -> anyhow::Result<String> {
    let mut engine = TeraEngine::new();
    engine.add_template(name, source)?;
    engine.render(name, ctx)
}
