mod env_overrides;
mod loader;
mod types;

pub use types::{
    Config, DEFAULT_MAX_STEPS, DEFAULT_REASONING_TOOL, EngineConfig, ModelConfig, ProviderKind,
    ProvidersConfig, ReliabilityConfig, ToolsConfig,
};
