use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Entries retained by the cycle log.
pub const LOG_CAPACITY: usize = 50;

const BROADCAST_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub severity: Severity,
}

/// Bounded, newest-first record of orchestrator activity.
///
/// Appends are atomic per entry and may come from any thread. Each entry is
/// also mirrored to `tracing` and broadcast to live subscribers.
pub struct EventLog {
    entries: Mutex<VecDeque<SystemLogEntry>>,
    capacity: usize,
    live: broadcast::Sender<SystemLogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (live, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
            live,
        }
    }

    pub fn append(&self, severity: Severity, message: impl Into<String>) -> SystemLogEntry {
        let entry = SystemLogEntry {
            timestamp: Utc::now(),
            message: message.into(),
            severity,
        };

        match severity {
            Severity::Info | Severity::Success => {
                tracing::info!(severity = %severity, "{}", entry.message);
            }
            Severity::Warning => tracing::warn!("{}", entry.message),
            Severity::Error => tracing::error!("{}", entry.message),
        }

        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.push_front(entry.clone());
        entries.truncate(self.capacity);
        // No subscribers is fine.
        let _ = self.live.send(entry.clone());
        entry
    }

    pub fn info(&self, message: impl Into<String>) -> SystemLogEntry {
        self.append(Severity::Info, message)
    }

    pub fn success(&self, message: impl Into<String>) -> SystemLogEntry {
        self.append(Severity::Success, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> SystemLogEntry {
        self.append(Severity::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> SystemLogEntry {
        self.append(Severity::Error, message)
    }

    /// Snapshot of the retained entries, newest first.
    pub fn entries(&self) -> Vec<SystemLogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receive entries as they are appended.
    pub fn subscribe(&self) -> broadcast::Receiver<SystemLogEntry> {
        self.live.subscribe()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn newest_entry_comes_first() {
        let log = EventLog::new();
        log.info("first");
        log.success("second");

        let entries = log.entries();
        assert_eq!(entries[0].message, "second");
        assert_eq!(entries[0].severity, Severity::Success);
        assert_eq!(entries[1].message, "first");
    }

    #[test]
    fn fifty_first_entry_evicts_the_oldest() {
        let log = EventLog::new();
        for i in 0..LOG_CAPACITY {
            log.info(format!("entry {i}"));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.entries().last().unwrap().message, "entry 0");

        log.info("entry 50");

        let entries = log.entries();
        assert_eq!(entries.len(), LOG_CAPACITY);
        assert_eq!(entries[0].message, "entry 50");
        assert_eq!(entries.last().unwrap().message, "entry 1");
        assert!(!entries.iter().any(|e| e.message == "entry 0"));
    }

    #[test]
    fn concurrent_appends_stay_bounded() {
        let log = Arc::new(EventLog::new());
        std::thread::scope(|scope| {
            for t in 0..8 {
                let log = Arc::clone(&log);
                scope.spawn(move || {
                    for i in 0..100 {
                        log.warning(format!("thread {t} entry {i}"));
                    }
                });
            }
        });
        assert_eq!(log.len(), LOG_CAPACITY);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let log = EventLog::with_capacity(0);
        log.error("dropped");
        log.error("kept");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].message, "kept");
    }

    #[tokio::test]
    async fn subscribers_see_appends_in_order() {
        let log = EventLog::new();
        let mut rx = log.subscribe();

        log.info("one");
        log.error("two");

        assert_eq!(rx.recv().await.unwrap().message, "one");
        let second = rx.recv().await.unwrap();
        assert_eq!(second.message, "two");
        assert_eq!(second.severity, Severity::Error);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let entry = SystemLogEntry {
            timestamp: Utc::now(),
            message: "ok".into(),
            severity: Severity::Warning,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["severity"], "warning");
        assert_eq!(Severity::Success.to_string(), "success");
    }
}
