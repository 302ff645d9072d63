use crate::engine::EngineOptions;
use crate::error::ConfigError;
use crate::llm::compatible::DEFAULT_OPENAI_URL;
use crate::llm::ollama::DEFAULT_OLLAMA_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_STEPS: usize = 100;
pub const DEFAULT_REASONING_TOOL: &str = "LLM";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    pub log_level: String,
    pub engine: EngineConfig,
    pub planner: ModelConfig,
    pub solver: ModelConfig,
    pub providers: ProvidersConfig,
    pub reliability: ReliabilityConfig,
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            log_level: "info".to_string(),
            engine: EngineConfig::default(),
            planner: ModelConfig::default(),
            solver: ModelConfig::default(),
            providers: ProvidersConfig::default(),
            reliability: ReliabilityConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Guardrails and reserved names for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_steps: usize,
    pub run_timeout_secs: Option<u64>,
    pub reasoning_tool_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            run_timeout_secs: None,
            reasoning_tool_name: DEFAULT_REASONING_TOOL.to_string(),
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderKind {
    #[default]
    Ollama,
    Openai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            model: "llama3.1".to_string(),
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub ollama_base_url: String,
    pub openai_base_url: String,
    pub api_key: Option<String>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: DEFAULT_OLLAMA_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityConfig {
    pub max_retries: u32,
    pub base_backoff_ms: u64,
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_backoff_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub workspace_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            workspace_dir: PathBuf::from("."),
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_steps == 0 {
            return Err(ConfigError::Validation(
                "engine.max_steps must be at least 1".into(),
            ));
        }

        let name = &self.engine.reasoning_tool_name;
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(ConfigError::Validation(format!(
                "engine.reasoning_tool_name must be a single word, got {name:?}"
            )));
        }

        if self.engine.run_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "engine.run_timeout_secs must be positive when set".into(),
            ));
        }

        for (section, model) in [("planner", &self.planner), ("solver", &self.solver)] {
            if !(0.0..=2.0).contains(&model.temperature) {
                return Err(ConfigError::Validation(format!(
                    "{section}.temperature must be within 0.0..=2.0, got {}",
                    model.temperature
                )));
            }
            if model.model.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{section}.model cannot be empty"
                )));
            }
        }

        Ok(())
    }

    /// Engine guardrails derived from this config.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_steps: self.engine.max_steps,
            run_timeout: self.engine.run_timeout_secs.map(Duration::from_secs),
            reasoning_tool_name: self.engine.reasoning_tool_name.clone(),
        }
    }
}
