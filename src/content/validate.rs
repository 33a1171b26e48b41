//! Defensive checks on a generated batch.
//!
//! The backing service is asked to honour the batch schema but is not
//! trusted to. Records that cannot be decoded or that break the candidate
//! contract are dropped one by one; an unparsable body yields an empty batch.

use super::{ContentSet, SCORE_RANGE};
use serde_json::Value;
use std::collections::HashSet;

/// Why a single candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingId,
    DuplicateId,
    MissingTopic,
    ScoreOutOfRange,
    NoScenes,
}

impl Rejection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingId => "missing id",
            Self::DuplicateId => "duplicate id",
            Self::MissingTopic => "missing topic",
            Self::ScoreOutOfRange => "score out of range",
            Self::NoScenes => "reel script has no scenes",
        }
    }
}

fn check(candidate: &ContentSet, seen: &HashSet<String>) -> Result<(), Rejection> {
    if candidate.id.trim().is_empty() {
        return Err(Rejection::MissingId);
    }
    if seen.contains(candidate.id.as_str()) {
        return Err(Rejection::DuplicateId);
    }
    if candidate.topic.trim().is_empty() {
        return Err(Rejection::MissingTopic);
    }
    if !candidate.score.is_finite() || !SCORE_RANGE.contains(&candidate.score) {
        return Err(Rejection::ScoreOutOfRange);
    }
    if candidate.reel_script.scenes.is_empty() {
        return Err(Rejection::NoScenes);
    }
    Ok(())
}

/// Keep the candidates that satisfy the contract, preserving order.
///
/// For duplicate ids the first occurrence wins.
pub fn retain_valid(candidates: Vec<ContentSet>) -> Vec<ContentSet> {
    let mut seen = HashSet::with_capacity(candidates.len());
    let mut kept = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match check(&candidate, &seen) {
            Ok(()) => {
                seen.insert(candidate.id.clone());
                kept.push(candidate);
            }
            Err(reason) => {
                tracing::warn!(id = %candidate.id, reason = reason.as_str(), "dropping candidate");
            }
        }
    }
    kept
}

/// Parse a generation response body into valid candidates.
pub fn parse_batch(text: &str) -> Vec<ContentSet> {
    let items = match serde_json::from_str::<Vec<Value>>(text.trim()) {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!(%error, "generation response is not a JSON array");
            return Vec::new();
        }
    };

    let decoded = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<ContentSet>(item) {
            Ok(set) => Some(set),
            Err(error) => {
                tracing::warn!(index, %error, "dropping undecodable candidate");
                None
            }
        })
        .collect();

    retain_valid(decoded)
}
