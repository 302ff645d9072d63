use crate::engine::Task;
use crate::error::{EngineError, Result, Stage};
use crate::llm::LanguageModel;
use crate::prompt::PromptTemplates;
use crate::tools::{ToolRegistry, ToolSpec};

const REASONING_DESCRIPTION: &str = "A pretrained LLM like yourself. Useful when you need to act \
with general world knowledge and common sense, or to extract and compare facts from earlier \
evidence. Input can be any instruction.";

/// Numbered tool catalog shown to the planner, with the reasoning pseudo-tool
/// appended last:
///
/// ```text
/// (1) CheckInventory[product_name, color]: Check stock
/// (2) LLM[input]: A pretrained LLM like yourself. ...
/// ```
pub fn tool_catalog(registry: &ToolRegistry, reasoning_tool: &str) -> String {
    let mut specs: Vec<ToolSpec> = registry
        .specs()
        .into_iter()
        .filter(|spec| spec.name != reasoning_tool)
        .collect();
    specs.push(ToolSpec {
        name: reasoning_tool.to_string(),
        description: REASONING_DESCRIPTION.to_string(),
        parameters: vec!["input".to_string()],
    });

    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| format!("({}) {}: {}", i + 1, spec.signature(), spec.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turns a task into plan text with a single model call.
pub struct Planner<'a> {
    model: &'a dyn LanguageModel,
    templates: &'a PromptTemplates,
}

impl<'a> Planner<'a> {
    pub fn new(model: &'a dyn LanguageModel, templates: &'a PromptTemplates) -> Self {
        Self { model, templates }
    }

    pub async fn plan(&self, task: &Task, catalog: &str, reasoning_tool: &str) -> Result<String> {
        let prompt = self
            .templates
            .planner_prompt(task, catalog, reasoning_tool)
            .map_err(|e| EngineError::Prompt(format!("{e:#}")))?;

        let text = self
            .model
            .generate(&prompt)
            .await
            .map_err(|e| EngineError::LanguageModel {
                stage: Stage::Plan,
                message: format!("{e:#}"),
            })?;

        tracing::debug!(
            model = self.model.name(),
            chars = text.len(),
            "Planner returned plan text"
        );
        Ok(text)
    }
}
