//! The daily content cycle: research, generation, selection, insight.

mod log;
mod orchestrator;
mod phase;

pub use log::{EventLog, LOG_CAPACITY, Severity, SystemLogEntry};
pub use orchestrator::{CycleOutcome, INSIGHT_PLACEHOLDER, Orchestrator};
pub use phase::Phase;
