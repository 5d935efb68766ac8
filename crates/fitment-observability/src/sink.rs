//! Log output targets.

use std::sync::{Arc, Mutex};

use crate::logging::{LogEntry, LogLevel};

/// Destination for rendered log entries.
pub trait LogSink: Send + Sync {
    /// Write one entry. `rendered` is the entry in the logger's format.
    fn write(&self, entry: &LogEntry, rendered: &str);
}

/// Writes rendered entries to stderr, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, _entry: &LogEntry, rendered: &str) {
        eprintln!("{}", rendered);
    }
}

/// Forwards entries to the `tracing` dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        let component = entry.component.as_str();
        match entry.level {
            LogLevel::Trace => tracing::trace!(component, "{}", rendered),
            LogLevel::Debug => tracing::debug!(component, "{}", rendered),
            LogLevel::Info => tracing::info!(component, "{}", rendered),
            LogLevel::Warn => tracing::warn!(component, "{}", rendered),
            LogLevel::Error => tracing::error!(component, "{}", rendered),
        }
    }
}

/// Keeps entries in memory; used by tests to assert on degraded paths.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Entries at or above a level.
    pub fn at_least(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level >= level)
            .collect()
    }

    /// Whether any entry's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries().iter().any(|e| e.message.contains(needle))
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, _rendered: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}
