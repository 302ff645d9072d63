use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Parameter name → bound value, produced by the engine's binder.
pub type BoundArgs = BTreeMap<String, String>;

/// Boxed future returned by [`Tool::execute`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

/// Description of a tool for the planner's catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<String>,
}

impl ToolSpec {
    /// Call shape as the planner should write it, e.g. `CheckInventory[product_name, color]`.
    pub fn signature(&self) -> String {
        format!("{}[{}]", self.name, self.parameters.join(", "))
    }
}

/// Core tool trait. Implement for any capability
pub trait Tool: Send + Sync {
    /// Tool name (used verbatim in plan lines)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Ordered parameter names; plan arguments bind to these by position
    fn parameters(&self) -> Vec<&str>;

    /// Execute the tool with bound arguments. An `Err` becomes evidence text,
    /// it never aborts a run.
    fn execute<'a>(&'a self, args: BoundArgs) -> ToolFuture<'a>;

    /// Get the full spec for catalog rendering
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().into_iter().map(str::to_string).collect(),
        }
    }
}

type Handler = dyn Fn(BoundArgs) -> anyhow::Result<String> + Send + Sync;

/// A capability record built from a closure: declared schema plus invoke.
#[derive(Clone)]
pub struct FnTool {
    name: String,
    description: String,
    parameters: Vec<String>,
    handler: Arc<Handler>,
}

impl FnTool {
    pub fn new<F>(name: &str, description: &str, parameters: &[&str], handler: F) -> Self
    where
        F: Fn(BoundArgs) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters: parameters.iter().map(|p| (*p).to_string()).collect(),
            handler: Arc::new(handler),
        }
    }
}

impl std::fmt::Debug for FnTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> Vec<&str> {
        self.parameters.iter().map(String::as_str).collect()
    }

    fn execute<'a>(&'a self, args: BoundArgs) -> ToolFuture<'a> {
        Box::pin(async move { (self.handler)(args) })
    }
}
