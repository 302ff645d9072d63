use super::{CompatibleModel, LanguageModel, OllamaModel, ReliableModel};
use crate::config::{ModelConfig, ProviderKind, ProvidersConfig, ReliabilityConfig};
use std::sync::Arc;

/// Build a retrying model client for one stage (planner or solver).
pub fn create_model(
    model: &ModelConfig,
    providers: &ProvidersConfig,
    reliability: &ReliabilityConfig,
) -> Arc<dyn LanguageModel> {
    match model.provider {
        ProviderKind::Ollama => Arc::new(ReliableModel::new(
            OllamaModel::new(
                Some(&providers.ollama_base_url),
                &model.model,
                model.temperature,
            ),
            reliability.max_retries,
            reliability.base_backoff_ms,
        )),
        ProviderKind::Openai => Arc::new(ReliableModel::new(
            CompatibleModel::new(
                "openai",
                &providers.openai_base_url,
                providers.api_key.as_deref(),
                &model.model,
                model.temperature,
            ),
            reliability.max_retries,
            reliability.base_backoff_ms,
        )),
    }
}
