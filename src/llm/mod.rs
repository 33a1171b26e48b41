// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod prompts;
pub mod scrub;
pub mod traits;
pub mod types;

// ── Client implementations ──────────────────────────────────────────────────
pub mod gemini;

pub use http_client::build_session_client;
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{ClientFuture, IntelligenceClient};
pub use types::{Blueprint, ResearchSource};

pub use gemini::GeminiClient;
