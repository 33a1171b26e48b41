use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("NEXUS_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY"))
            && !key.is_empty()
        {
            self.intelligence.api_key = Some(key);
        }

        if let Ok(url) = std::env::var("NEXUS_BASE_URL")
            && !url.is_empty()
        {
            self.intelligence.base_url = url;
        }

        if let Ok(model) = std::env::var("NEXUS_RESEARCH_MODEL")
            && !model.is_empty()
        {
            self.intelligence.research_model = model;
        }

        if let Ok(model) = std::env::var("NEXUS_GENERATION_MODEL")
            && !model.is_empty()
        {
            self.intelligence.generation_model = model;
        }

        if let Ok(model) = std::env::var("NEXUS_INSIGHT_MODEL")
            && !model.is_empty()
        {
            self.intelligence.insight_model = model;
        }

        if let Ok(budget_str) = std::env::var("NEXUS_THINKING_BUDGET")
            && let Ok(budget) = budget_str.parse::<u32>()
        {
            self.intelligence.thinking_budget = budget;
        }

        if let Ok(level) = std::env::var("NEXUS_LOG_LEVEL")
            && !level.is_empty()
        {
            self.observability.log_level = level;
        }
    }
}
