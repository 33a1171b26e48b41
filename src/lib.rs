#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod content;
pub mod cycle;
pub mod error;
pub mod llm;
pub mod profile;

pub use config::Config;
pub use cycle::{CycleOutcome, Orchestrator, Phase};
pub use error::{CycleError, NexusError};
