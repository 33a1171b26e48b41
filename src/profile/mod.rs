//! Creator/brand profile captured once at onboarding.
//!
//! The orchestrator only ever reads a profile; it is written by the
//! onboarding command and shared as an `Arc<UserConfig>`.

mod store;
mod types;

pub use store::ProfileStore;
pub use types::{BrandInputs, ContentConstraints, SocialConnections, TrainingData, UserConfig};

#[cfg(test)]
pub(crate) use types::sample_profile;
