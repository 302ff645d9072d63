use super::substitution::substitute;
use crate::engine::{EvidenceStore, Plan, Task};
use crate::error::{EngineError, Result, Stage};
use crate::llm::LanguageModel;
use crate::prompt::PromptTemplates;
use std::fmt::Write;

/// Human-readable record of a run for the solver prompt.
///
/// Parameters are shown resolved against the final evidence, followed by
/// every evidence entry in commit order:
///
/// ```text
/// Plan: Look up the order
/// #E1 = OrderStatus[12345]
///
/// Evidence:
/// #E1 = Delivered
/// ```
pub fn transcript(plan: &Plan, evidence: &EvidenceStore) -> String {
    let mut out = String::new();
    for step in &plan.steps {
        let _ = writeln!(out, "Plan: {}", step.description);
        let _ = writeln!(
            out,
            "{} = {}[{}]",
            step.variable,
            step.tool,
            substitute(&step.raw_params, evidence)
        );
    }

    out.push_str("\nEvidence:\n");
    for (variable, value) in evidence.iter() {
        let _ = writeln!(out, "{variable} = {value}");
    }
    out
}

/// Turns a task plus gathered evidence into the final answer with a single
/// model call.
pub struct Solver<'a> {
    model: &'a dyn LanguageModel,
    templates: &'a PromptTemplates,
}

impl<'a> Solver<'a> {
    pub fn new(model: &'a dyn LanguageModel, templates: &'a PromptTemplates) -> Self {
        Self { model, templates }
    }

    pub async fn solve(&self, task: &Task, plan: &Plan, evidence: &EvidenceStore) -> Result<String> {
        let prompt = self
            .templates
            .solver_prompt(task, &transcript(plan, evidence))
            .map_err(|e| EngineError::Prompt(format!("{e:#}")))?;

        let answer = self
            .model
            .generate(&prompt)
            .await
            .map_err(|e| EngineError::LanguageModel {
                stage: Stage::Solve,
                message: format!("{e:#}"),
            })?;

        tracing::debug!(model = self.model.name(), chars = answer.len(), "Solver answered");
        Ok(answer)
    }
}
