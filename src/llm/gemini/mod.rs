//! Google Gemini implementation of [`IntelligenceClient`].
//!
//! Every call opens its own [`GeminiSession`]: credentials are resolved
//! again and a fresh HTTP client is built, so a key rotated between the
//! research and insight calls is picked up. The session owns the key in a
//! zeroizing buffer and releases both when the call returns.

use crate::config::{Config, IntelligenceConfig};
use crate::content::{ContentSet, parse_batch, schema::content_batch_schema};
use crate::error::LlmError;
use crate::llm::{
    build_session_client, prompts, sanitize_api_error,
    traits::{ClientFuture, IntelligenceClient},
    types::{Blueprint, ResearchSource},
};
use crate::profile::UserConfig;
use reqwest::{Client, StatusCode};
use zeroize::Zeroizing;

mod types;
use types::{
    Content, ErrorEnvelope, GeminiTool, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, GoogleSearch, Part, ThinkingConfig,
};

const STAGE_RESEARCH: &str = "research";
const STAGE_GENERATION: &str = "generation";
const STAGE_INSIGHT: &str = "insight";

/// Insight text when the model answers with nothing.
const EMPTY_INSIGHT: &str = "No insights available.";

/// Env vars consulted, in order, when the config carries no key.
const KEY_ENV_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

pub struct GeminiClient {
    settings: IntelligenceConfig,
}

/// Short-lived authenticated request context for one call.
struct GeminiSession {
    client: Client,
    api_key: Zeroizing<String>,
    stage: &'static str,
}

impl GeminiClient {
    pub fn new(settings: IntelligenceConfig) -> Self {
        Self { settings }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.intelligence.clone())
    }

    /// Check if any Gemini authentication is available right now.
    pub fn has_any_auth(&self) -> bool {
        self.resolve_api_key().is_some()
    }

    fn resolve_api_key(&self) -> Option<Zeroizing<String>> {
        self.settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                KEY_ENV_VARS
                    .iter()
                    .find_map(|var| std::env::var(var).ok().filter(|k| !k.trim().is_empty()))
            })
            .map(Zeroizing::new)
    }

    fn open_session(&self, stage: &'static str) -> Result<GeminiSession, LlmError> {
        let api_key = self.resolve_api_key().ok_or(LlmError::Auth)?;
        Ok(GeminiSession {
            client: build_session_client(
                self.settings.request_timeout_secs,
                self.settings.connect_timeout_secs,
            ),
            api_key,
            stage,
        })
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            Self::model_name(model)
        )
    }

    fn user_prompt(prompt: String) -> Vec<Content> {
        vec![Content {
            role: "user".to_string(),
            parts: vec![Part { text: prompt }],
        }]
    }

    fn research_request(&self, profile: &UserConfig) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: Self::user_prompt(prompts::research_prompt(profile)),
            tools: self.settings.live_research.then(|| {
                vec![GeminiTool {
                    google_search: GoogleSearch {},
                }]
            }),
            generation_config: None,
        }
    }

    fn generation_request(
        &self,
        profile: &UserConfig,
        blueprint: &str,
        recent_topics: &[String],
    ) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: Self::user_prompt(prompts::generation_prompt(
                profile,
                blueprint,
                recent_topics,
            )),
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(content_batch_schema()),
                thinking_config: (self.settings.thinking_budget > 0).then(|| ThinkingConfig {
                    thinking_budget: self.settings.thinking_budget,
                }),
            }),
        }
    }

    fn insight_request(selected: &ContentSet) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: Self::user_prompt(prompts::insight_prompt(selected)),
            tools: None,
            generation_config: None,
        }
    }

    /// Concatenate the visible text parts of the first candidate.
    fn extract_text(result: &GenerateContentResponse) -> String {
        let Some(content) = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.content.as_ref())
        else {
            return String::new();
        };

        let mut out = String::new();
        for part in content.parts.iter().filter(|p| !p.thought) {
            if let Some(t) = &part.text {
                out.push_str(t);
            }
        }
        out
    }

    /// Web citations attached by search grounding, in response order.
    fn extract_sources(result: &GenerateContentResponse) -> Vec<ResearchSource> {
        result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| {
                        let uri = web.uri.as_deref().filter(|u| !u.is_empty())?;
                        Some(ResearchSource {
                            title: web
                                .title
                                .clone()
                                .filter(|t| !t.is_empty())
                                .unwrap_or_else(|| "Source".to_string()),
                            uri: uri.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn research_impl(&self, profile: &UserConfig) -> Result<Blueprint, LlmError> {
        let model = &self.settings.research_model;
        let session = self.open_session(STAGE_RESEARCH)?;
        let result = session
            .call(&self.endpoint(model), &self.research_request(profile))
            .await?;

        let summary = Self::extract_text(&result);
        if summary.trim().is_empty() {
            return Err(LlmError::EmptyResponse {
                stage: STAGE_RESEARCH,
            });
        }
        let sources = Self::extract_sources(&result);
        tracing::debug!(model = %model, sources = sources.len(), "research blueprint received");
        Ok(Blueprint::new(summary).with_sources(sources))
    }

    async fn generate_impl(
        &self,
        profile: &UserConfig,
        blueprint: &str,
        recent_topics: &[String],
    ) -> Result<Vec<ContentSet>, LlmError> {
        let model = &self.settings.generation_model;
        let session = self.open_session(STAGE_GENERATION)?;
        let request = self.generation_request(profile, blueprint, recent_topics);
        let result = session.call(&self.endpoint(model), &request).await?;

        let body = Self::extract_text(&result);
        let candidates = parse_batch(&body);
        tracing::debug!(
            model = %model,
            candidates = candidates.len(),
            "generation batch parsed"
        );
        Ok(candidates)
    }

    async fn insight_impl(&self, selected: &ContentSet) -> Result<String, LlmError> {
        let model = &self.settings.insight_model;
        let session = self.open_session(STAGE_INSIGHT)?;
        let result = session
            .call(&self.endpoint(model), &Self::insight_request(selected))
            .await?;

        let text = Self::extract_text(&result);
        if text.trim().is_empty() {
            tracing::warn!(model = %model, "insight response was empty");
            return Ok(EMPTY_INSIGHT.to_string());
        }
        Ok(text)
    }
}

impl GeminiSession {
    fn request_error(&self, message: impl AsRef<str>) -> LlmError {
        LlmError::Request {
            stage: self.stage,
            message: sanitize_api_error(message.as_ref()),
        }
    }

    async fn call(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| self.request_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(self.request_error(format!(
                "Gemini API error ({}): {}",
                status.as_u16(),
                error_reason(status, &body)
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(sanitize_api_error(&e.to_string())))?;

        if let Some(err) = result.error.as_ref() {
            return Err(self.request_error(format!("Gemini API error: {}", err.message)));
        }

        if let Some(usage) = result.usage_metadata.as_ref() {
            tracing::debug!(
                stage = self.stage,
                model_version = result.model_version.as_deref().unwrap_or("unknown"),
                finish_reason = result
                    .candidates
                    .as_ref()
                    .and_then(|c| c.first())
                    .and_then(|c| c.finish_reason.as_deref())
                    .unwrap_or("none"),
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                thinking_tokens = usage.thoughts_token_count,
                "gemini call finished"
            );
        }

        Ok(result)
    }
}

/// The API's own error message when the body carries one, else the status
/// reason. Raw bodies never reach the caller.
fn error_reason(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        })
}

impl IntelligenceClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn research<'a>(&'a self, profile: &'a UserConfig) -> ClientFuture<'a, Blueprint> {
        Box::pin(self.research_impl(profile))
    }

    fn generate<'a>(
        &'a self,
        profile: &'a UserConfig,
        blueprint: &'a str,
        recent_topics: &'a [String],
    ) -> ClientFuture<'a, Vec<ContentSet>> {
        Box::pin(self.generate_impl(profile, blueprint, recent_topics))
    }

    fn synthesize_insight<'a>(&'a self, selected: &'a ContentSet) -> ClientFuture<'a, String> {
        Box::pin(self.insight_impl(selected))
    }
}
