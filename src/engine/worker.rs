use super::binder::bind;
use super::substitution::substitute;
use crate::engine::{EvidenceStore, Step};
use crate::error::{EngineError, Result, Stage, ToolExecutionError};
use crate::llm::LanguageModel;
use crate::tools::ToolRegistry;
use std::sync::Arc;

/// Evidence produced by one step, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutput {
    pub variable: String,
    /// Parameter text after evidence substitution.
    pub resolved_params: String,
    pub value: String,
    /// The tool returned an error and `value` is the error-marked text.
    pub tool_failed: bool,
}

/// Executes plan steps one at a time against the tool registry.
///
/// The reasoning pseudo-tool is routed to the language model and shadows any
/// registered tool of the same name.
pub struct Worker {
    registry: Arc<ToolRegistry>,
    reasoner: Arc<dyn LanguageModel>,
    reasoning_tool: String,
}

impl Worker {
    pub fn new(
        registry: Arc<ToolRegistry>,
        reasoner: Arc<dyn LanguageModel>,
        reasoning_tool: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            reasoner,
            reasoning_tool: reasoning_tool.into(),
        }
    }

    /// Run `step` with its parameters resolved against `evidence`.
    ///
    /// Unknown tools and reasoning failures are fatal. A failing tool is not:
    /// its error becomes the step's evidence.
    pub async fn execute(&self, step: &Step, evidence: &EvidenceStore) -> Result<StepOutput> {
        let resolved_params = substitute(&step.raw_params, evidence);

        if step.tool == self.reasoning_tool {
            tracing::debug!(variable = step.variable.as_str(), "Invoking reasoning tool");
            let value = self.reasoner.generate(&resolved_params).await.map_err(|e| {
                EngineError::LanguageModel {
                    stage: Stage::Execute,
                    message: format!("{e:#}"),
                }
            })?;
            return Ok(StepOutput {
                variable: step.variable.clone(),
                resolved_params,
                value,
                tool_failed: false,
            });
        }

        let Some(tool) = self.registry.get(&step.tool) else {
            tracing::warn!(
                variable = step.variable.as_str(),
                tool = step.tool.as_str(),
                "Plan step names an unregistered tool"
            );
            return Err(EngineError::UnknownTool {
                variable: step.variable.clone(),
                tool: step.tool.clone(),
            });
        };

        let args = bind(&tool.parameters(), &resolved_params);
        tracing::debug!(
            variable = step.variable.as_str(),
            tool = step.tool.as_str(),
            args = args.len(),
            "Invoking tool"
        );

        let (value, tool_failed) = match tool.execute(args).await {
            Ok(output) => (output, false),
            Err(e) => {
                let failure = ToolExecutionError::new(step.tool.as_str(), &e);
                tracing::warn!(
                    variable = step.variable.as_str(),
                    tool = step.tool.as_str(),
                    error = %failure.message,
                    "Tool failed, recording error as evidence"
                );
                (failure.to_evidence(), true)
            }
        };

        Ok(StepOutput {
            variable: step.variable.clone(),
            resolved_params,
            value,
            tool_failed,
        })
    }
}
