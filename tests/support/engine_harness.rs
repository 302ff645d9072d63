#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rewoo::llm::GenerateFuture;
use rewoo::tools::{BoundArgs, ToolFuture};
use rewoo::{Engine, EngineOptions, FnTool, LanguageModel, Tool, ToolRegistry};

/// Language model that replays canned replies in order and records every
/// prompt it receives.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<anyhow::Result<String>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedModel {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self::from_results(
            replies.iter().map(|r| Ok((*r).to_string())).collect(),
            None,
        ))
    }

    /// Replies where `None` is a failed call.
    pub fn with_failures(replies: &[Option<&str>]) -> Arc<Self> {
        Arc::new(Self::from_results(
            replies
                .iter()
                .map(|r| {
                    r.map(str::to_string)
                        .ok_or_else(|| anyhow::anyhow!("model unavailable"))
                })
                .collect(),
            None,
        ))
    }

    /// Every call sleeps for `delay` before answering.
    pub fn slow(replies: &[&str], delay: Duration) -> Arc<Self> {
        Arc::new(Self::from_results(
            replies.iter().map(|r| Ok((*r).to_string())).collect(),
            Some(delay),
        ))
    }

    fn from_results(replies: VecDeque<anyhow::Result<String>>, delay: Option<Duration>) -> Self {
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
            delay,
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(async move {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = self.replies.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Err(anyhow::anyhow!("script exhausted")))
        })
    }
}

type Responder = dyn Fn(&BoundArgs) -> anyhow::Result<String> + Send + Sync;

/// Tool that records the bound arguments of every call.
pub struct RecordingTool {
    name: String,
    parameters: Vec<String>,
    respond: Box<Responder>,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<BoundArgs>>>,
}

impl RecordingTool {
    pub fn new(
        name: &str,
        parameters: &[&str],
        respond: impl Fn(&BoundArgs) -> anyhow::Result<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            parameters: parameters.iter().map(|p| (*p).to_string()).collect(),
            respond: Box::new(respond),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle that outlives the registry the tool is moved into.
    pub fn calls(&self) -> Arc<Mutex<Vec<BoundArgs>>> {
        Arc::clone(&self.calls)
    }
}

impl Tool for RecordingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "recording test tool"
    }

    fn parameters(&self) -> Vec<&str> {
        self.parameters.iter().map(String::as_str).collect()
    }

    fn execute<'a>(&'a self, args: BoundArgs) -> ToolFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(args.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            (self.respond)(&args)
        })
    }
}

/// Customer-support mocks with fixed data.
pub fn support_registry() -> ToolRegistry {
    ToolRegistry::new()
        .with(FnTool::new(
            "OrderStatus",
            "Check the status of an order by order ID",
            &["order_id"],
            |args| match args["order_id"].as_str() {
                "12345" => Ok("Blue Jeans".to_string()),
                "777" => Ok("Delivered".to_string()),
                other => anyhow::bail!("order {other} not found"),
            },
        ))
        .with(FnTool::new(
            "CheckInventory",
            "Check product availability",
            &["product_name", "color"],
            |args| {
                Ok(format!(
                    "item from {}, {}",
                    args["product_name"], args["color"]
                ))
            },
        ))
}

pub fn engine(model: Arc<ScriptedModel>, registry: ToolRegistry) -> Engine {
    Engine::new(model, Arc::new(registry), EngineOptions::default())
}

pub fn engine_with(
    model: Arc<ScriptedModel>,
    registry: ToolRegistry,
    options: EngineOptions,
) -> Engine {
    Engine::new(model, Arc::new(registry), options)
}

/// `count` well-formed plan lines calling `tool` with the step number.
pub fn numbered_plan(count: usize, tool: &str) -> String {
    (1..=count)
        .map(|i| format!("Plan: step {i} #E{i} = {tool}[{i}]"))
        .collect::<Vec<_>>()
        .join("\n")
}
