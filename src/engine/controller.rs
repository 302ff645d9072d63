use super::planner::{Planner, tool_catalog};
use super::solver::Solver;
use super::worker::Worker;
use crate::config::{DEFAULT_MAX_STEPS, DEFAULT_REASONING_TOOL};
use crate::engine::{EvidenceStore, ExecutionCursor, Plan, PlanParser, RunResult, Task};
use crate::error::{EngineError, Result, Stage};
use crate::llm::LanguageModel;
use crate::prompt::PromptTemplates;
use crate::tools::ToolRegistry;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;

/// Guardrails for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Plans with more steps are rejected before anything executes.
    pub max_steps: usize,
    /// Wall-clock budget for the whole run, planner and solver included.
    pub run_timeout: Option<Duration>,
    /// Step tool name routed to the language model instead of the registry.
    pub reasoning_tool_name: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            run_timeout: None,
            reasoning_tool_name: DEFAULT_REASONING_TOOL.to_string(),
        }
    }
}

/// Run deadline fixed when the run starts.
#[derive(Debug, Clone, Copy)]
struct Budget {
    deadline: Instant,
    timeout: Duration,
}

/// Plan → (Execute)* → Solve controller.
///
/// The registry and models are shared read-only; every run owns its own plan,
/// evidence and cursor, so one `Engine` can serve concurrent runs.
pub struct Engine {
    registry: Arc<ToolRegistry>,
    planner_model: Arc<dyn LanguageModel>,
    solver_model: Arc<dyn LanguageModel>,
    templates: PromptTemplates,
    options: EngineOptions,
}

impl Engine {
    /// `llm` serves the planner, the solver and the reasoning tool until
    /// [`with_solver_model`](Self::with_solver_model) splits the solver off.
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        registry: Arc<ToolRegistry>,
        options: EngineOptions,
    ) -> Self {
        if registry.contains(&options.reasoning_tool_name) {
            tracing::warn!(
                tool = options.reasoning_tool_name.as_str(),
                "Registered tool is shadowed by the reasoning tool"
            );
        }
        Self {
            registry,
            solver_model: Arc::clone(&llm),
            planner_model: llm,
            templates: PromptTemplates::default(),
            options,
        }
    }

    #[must_use]
    pub fn with_solver_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.solver_model = model;
        self
    }

    #[must_use]
    pub fn with_templates(mut self, templates: PromptTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Catalog text the planner sees.
    pub fn tool_catalog(&self) -> String {
        tool_catalog(&self.registry, &self.options.reasoning_tool_name)
    }

    /// Parse plan text under this engine's step limit.
    pub fn parse_plan(&self, text: &str) -> Result<Plan> {
        PlanParser::parse(text, self.options.max_steps)
    }

    /// Plan, execute every step in order, then solve.
    pub async fn run(&self, task: &Task) -> Result<RunResult> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("run", run_id = %run_id);
        self.drive(run_id, task, None).instrument(span).await
    }

    /// Like [`run`](Self::run) with the planner call replaced by recorded
    /// plan text.
    pub async fn execute_plan(&self, task: &Task, plan_text: &str) -> Result<RunResult> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("run", run_id = %run_id, replay = true);
        self.drive(run_id, task, Some(plan_text))
            .instrument(span)
            .await
    }

    async fn drive(
        &self,
        run_id: String,
        task: &Task,
        recorded_plan: Option<&str>,
    ) -> Result<RunResult> {
        let budget = self.options.run_timeout.map(|timeout| Budget {
            deadline: Instant::now() + timeout,
            timeout,
        });
        let mut evidence = EvidenceStore::new();
        let mut cursor = ExecutionCursor::new();

        let plan_text = match recorded_plan {
            Some(text) => text.to_string(),
            None => {
                let catalog = self.tool_catalog();
                let planner = Planner::new(self.planner_model.as_ref(), &self.templates);
                self.guarded(
                    budget,
                    Stage::Plan,
                    cursor,
                    &evidence,
                    planner.plan(task, &catalog, &self.options.reasoning_tool_name),
                )
                .await?
            }
        };

        let plan = self.parse_plan(&plan_text)?;
        tracing::info!(steps = plan.len(), "Plan accepted");

        let worker = Worker::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.planner_model),
            self.options.reasoning_tool_name.as_str(),
        );

        for step in &plan.steps {
            let output = self
                .guarded(
                    budget,
                    Stage::Execute,
                    cursor,
                    &evidence,
                    worker.execute(step, &evidence),
                )
                .await?;

            tracing::info!(
                variable = output.variable.as_str(),
                tool = step.tool.as_str(),
                tool_failed = output.tool_failed,
                "Step completed"
            );
            evidence.record(output.variable, output.value);
            cursor.advance();
        }

        debug_assert!(cursor.is_done(&plan));

        let solver = Solver::new(self.solver_model.as_ref(), &self.templates);
        let answer = self
            .guarded(
                budget,
                Stage::Solve,
                cursor,
                &evidence,
                solver.solve(task, &plan, &evidence),
            )
            .await?;

        tracing::info!(steps = cursor.completed(), "Run finished");
        Ok(RunResult {
            run_id,
            task: task.clone(),
            plan,
            evidence,
            steps_executed: cursor.completed(),
            answer,
        })
    }

    /// Await `fut` within the run budget. The deadline is checked before the
    /// call starts and enforced while it is pending.
    async fn guarded<T>(
        &self,
        budget: Option<Budget>,
        stage: Stage,
        cursor: ExecutionCursor,
        evidence: &EvidenceStore,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let Some(budget) = budget else {
            return fut.await;
        };

        if Instant::now() >= budget.deadline {
            return Err(deadline_exceeded(budget, stage, cursor, evidence));
        }

        match tokio::time::timeout_at(budget.deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(deadline_exceeded(budget, stage, cursor, evidence)),
        }
    }
}

fn deadline_exceeded(
    budget: Budget,
    stage: Stage,
    cursor: ExecutionCursor,
    evidence: &EvidenceStore,
) -> EngineError {
    tracing::warn!(
        %stage,
        completed_steps = cursor.completed(),
        timeout_ms = u64::try_from(budget.timeout.as_millis()).unwrap_or(u64::MAX),
        "Run deadline exceeded"
    );
    EngineError::DeadlineExceeded {
        stage,
        timeout: budget.timeout,
        completed_steps: cursor.completed(),
        evidence: evidence.clone(),
    }
}
