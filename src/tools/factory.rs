use super::{FileReadTool, HttpGetTool, Tool, ToolRegistry};
use crate::config::ToolsConfig;

/// Built-in tools available to the CLI.
pub fn default_tools(config: &ToolsConfig) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(FileReadTool::new(config.workspace_dir.clone())),
        Box::new(HttpGetTool::new(config.http_timeout_secs)),
    ]
}

pub fn default_registry(config: &ToolsConfig) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in default_tools(config) {
        registry.register(tool);
    }
    registry
}
