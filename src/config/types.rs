use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest thinking budget the generation model accepts.
pub const MAX_THINKING_BUDGET: u32 = 32_768;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Path to the onboarding profile - computed from home, not serialized
    #[serde(skip)]
    pub profile_path: PathBuf,

    #[serde(default)]
    pub intelligence: IntelligenceConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_pro_model")]
    pub research_model: String,
    #[serde(default = "default_pro_model")]
    pub generation_model: String,
    #[serde(default = "default_flash_model")]
    pub insight_model: String,
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Ground niche research in live web search results.
    #[serde(default = "default_true")]
    pub live_research: bool,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_pro_model() -> String {
    "gemini-3-pro-preview".into()
}

fn default_flash_model() -> String {
    "gemini-3-flash-preview".into()
}

fn default_thinking_budget() -> u32 {
    MAX_THINKING_BUDGET
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            research_model: default_pro_model(),
            generation_model: default_pro_model(),
            insight_model: default_flash_model(),
            thinking_budget: default_thinking_budget(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            live_research: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ObservabilityConfig {
    /// Resolve the configured level, falling back to INFO on unknown names.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .trim()
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

fn default_interval_hours() -> u64 {
    24
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_hours: default_interval_hours(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let intel = &self.intelligence;
        if intel.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "intelligence.base_url must not be empty".into(),
            ));
        }
        for (field, model) in [
            ("research_model", &intel.research_model),
            ("generation_model", &intel.generation_model),
            ("insight_model", &intel.insight_model),
        ] {
            if model.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "intelligence.{field} must not be empty"
                )));
            }
        }
        if intel.thinking_budget > MAX_THINKING_BUDGET {
            return Err(ConfigError::Validation(format!(
                "intelligence.thinking_budget must be at most {MAX_THINKING_BUDGET}"
            )));
        }
        if intel.request_timeout_secs == 0 || intel.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "intelligence timeouts must be greater than zero".into(),
            ));
        }
        if !(1..=168).contains(&self.schedule.interval_hours) {
            return Err(ConfigError::Validation(
                "schedule.interval_hours must be between 1 and 168".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn defaults_match_cycle_models() {
        let intel = IntelligenceConfig::default();
        assert_eq!(intel.research_model, "gemini-3-pro-preview");
        assert_eq!(intel.generation_model, "gemini-3-pro-preview");
        assert_eq!(intel.insight_model, "gemini-3-flash-preview");
        assert_eq!(intel.thinking_budget, 32_768);
        assert!(intel.live_research);
    }

    #[test]
    fn empty_toml_fills_every_section() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.schedule.interval_hours, 24);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.intelligence.base_url.starts_with("https://"));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [intelligence]
            insight_model = "gemini-2.5-flash"
            thinking_budget = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.intelligence.insight_model, "gemini-2.5-flash");
        assert_eq!(config.intelligence.thinking_budget, 1024);
        assert_eq!(config.intelligence.research_model, "gemini-3-pro-preview");
    }

    #[test]
    fn rejects_oversized_thinking_budget() {
        let mut config = Config::default();
        config.intelligence.thinking_budget = MAX_THINKING_BUDGET + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("thinking_budget"));
    }

    #[test]
    fn rejects_blank_model() {
        let mut config = Config::default();
        config.intelligence.insight_model = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("insight_model"));
    }

    #[test]
    fn rejects_zero_interval() {
        let mut config = Config::default();
        config.schedule.interval_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn tracing_level_falls_back_to_info() {
        let obs = ObservabilityConfig {
            log_level: "loud".into(),
        };
        assert_eq!(obs.tracing_level(), tracing::Level::INFO);

        let obs = ObservabilityConfig {
            log_level: "debug".into(),
        };
        assert_eq!(obs.tracing_level(), tracing::Level::DEBUG);
    }
}
