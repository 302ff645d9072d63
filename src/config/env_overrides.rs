use super::{Config, ProviderKind};

impl Config {
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source. Empty or unparsable
    /// values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = var("REWOO_API_KEY").or_else(|| var("OPENAI_API_KEY")) {
            self.providers.api_key = Some(key);
        }

        if let Some(provider) = var("REWOO_PROVIDER")
            && let Ok(kind) = provider.parse::<ProviderKind>()
        {
            self.planner.provider = kind;
            self.solver.provider = kind;
        }

        if let Some(model) = var("REWOO_MODEL") {
            self.planner.model.clone_from(&model);
            self.solver.model = model;
        }

        if let Some(model) = var("REWOO_SOLVER_MODEL") {
            self.solver.model = model;
        }

        if let Some(url) = var("REWOO_OLLAMA_URL") {
            self.providers.ollama_base_url = url;
        }

        if let Some(raw) = var("REWOO_MAX_STEPS")
            && let Ok(max_steps) = raw.parse::<usize>()
        {
            self.engine.max_steps = max_steps;
        }

        if let Some(raw) = var("REWOO_RUN_TIMEOUT_SECS")
            && let Ok(secs) = raw.parse::<u64>()
        {
            self.engine.run_timeout_secs = Some(secs);
        }

        if let Some(level) = var("REWOO_LOG_LEVEL") {
            self.log_level = level;
        }
    }
}
