use super::types::Blueprint;
use crate::content::ContentSet;
use crate::error::LlmError;
use crate::profile::UserConfig;
use std::future::Future;
use std::pin::Pin;

pub type ClientFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LlmError>> + Send + 'a>>;

/// The three capabilities a cycle needs from the generative service.
///
/// Implementations are stateless between calls; each call establishes its
/// own request context.
pub trait IntelligenceClient: Send + Sync {
    /// Client identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Research the creator's niche and summarize what performs.
    fn research<'a>(&'a self, profile: &'a UserConfig) -> ClientFuture<'a, Blueprint>;

    /// Produce candidate content sets from the profile and blueprint.
    ///
    /// A response that cannot be parsed yields an empty batch rather than
    /// an error. `recent_topics` lists past winners not to repeat.
    fn generate<'a>(
        &'a self,
        profile: &'a UserConfig,
        blueprint: &'a str,
        recent_topics: &'a [String],
    ) -> ClientFuture<'a, Vec<ContentSet>>;

    /// Explain why the selected candidate should perform.
    fn synthesize_insight<'a>(&'a self, selected: &'a ContentSet) -> ClientFuture<'a, String>;
}
