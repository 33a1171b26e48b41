//! Candidate content packages and the rules for choosing one.

pub mod schema;
pub mod selection;
mod types;
pub mod validate;

pub use selection::{rank, select_best};
pub use types::{ContentSet, DailyAsset, ReelScript, Scene};
pub use validate::{parse_batch, retain_valid};

#[cfg(test)]
pub(crate) use types::candidate;

/// How many candidates every generation request asks for.
pub const CANDIDATES_PER_CYCLE: usize = 10;

/// Inclusive bounds of a predictive engagement score.
pub const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;
