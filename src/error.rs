use thiserror::Error;

use crate::cycle::Phase;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `nexus`.
///
/// Each subsystem defines its own error variant. Hosts can match on these to
/// decide what to show; internal plumbing keeps using `anyhow::Result` for
/// ad-hoc context chains.
#[derive(Debug, Error)]
pub enum NexusError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Profile store ───────────────────────────────────────────────────
    #[error("profile: {0}")]
    Profile(#[from] ProfileError),

    // ── Generative intelligence client ──────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Cycle orchestrator ──────────────────────────────────────────────
    #[error("cycle: {0}")]
    Cycle(#[from] CycleError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Profile errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no profile found; run `nexus onboard` first")]
    Missing,

    #[error("invalid profile: {0}")]
    Invalid(String),

    #[error("training sample {field}[{index}] is not valid base64")]
    InvalidSample { field: &'static str, index: usize },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

// ─── LLM errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{stage} request failed: {message}")]
    Request {
        stage: &'static str,
        message: String,
    },

    #[error("no API key available; set GEMINI_API_KEY or intelligence.api_key")]
    Auth,

    #[error("{stage} returned no usable text")]
    EmptyResponse { stage: &'static str },

    #[error("malformed response: {0}")]
    Malformed(String),
}

// ─── Cycle errors ────────────────────────────────────────────────────────────

/// Why a cycle did not produce a `DailyAsset`.
///
/// `Research` and `Generation` are the fatal stage failures; the others are
/// raised before any step runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("no profile loaded; onboarding has not completed")]
    NotOnboarded,

    #[error("profile rejected: {0}")]
    InvalidProfile(String),

    #[error("a cycle is already in flight")]
    AlreadyRunning,

    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },

    #[error("Niche research failed: {0}")]
    Research(String),

    #[error("Failed to generate content sets: {0}")]
    Generation(String),

    #[error("cycle cancelled")]
    Cancelled,
}

impl CycleError {
    /// Short stage label used in structured logs.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::NotOnboarded
            | Self::InvalidProfile(_)
            | Self::AlreadyRunning
            | Self::InvalidTransition { .. } => "guard",
            Self::Research(_) => "research",
            Self::Generation(_) => "generation",
            Self::Cancelled => "cancel",
        }
    }

    /// Whether the error aborted a cycle that had already started.
    pub fn is_fatal_stage(&self) -> bool {
        matches!(self, Self::Research(_) | Self::Generation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = NexusError::Config(ConfigError::Validation("bad budget".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let nexus_err: NexusError = anyhow_err.into();
        assert!(nexus_err.to_string().contains("something went wrong"));
    }

    #[test]
    fn cycle_error_reports_stage() {
        assert_eq!(CycleError::Research("offline".into()).stage(), "research");
        assert_eq!(CycleError::Generation("empty".into()).stage(), "generation");
        assert_eq!(CycleError::AlreadyRunning.stage(), "guard");
    }

    #[test]
    fn only_step_failures_are_fatal_stage_errors() {
        assert!(CycleError::Research("x".into()).is_fatal_stage());
        assert!(CycleError::Generation("x".into()).is_fatal_stage());
        assert!(!CycleError::Cancelled.is_fatal_stage());
        assert!(!CycleError::NotOnboarded.is_fatal_stage());
    }

    #[test]
    fn invalid_transition_names_both_phases() {
        let err = CycleError::InvalidTransition {
            from: Phase::Completed,
            to: Phase::Onboarding,
        };
        let text = err.to_string();
        assert!(text.contains("completed"));
        assert!(text.contains("onboarding"));
    }

    #[test]
    fn invalid_sample_names_field_and_index() {
        let err = ProfileError::InvalidSample {
            field: "images",
            index: 2,
        };
        assert_eq!(err.to_string(), "training sample images[2] is not valid base64");
    }
}
