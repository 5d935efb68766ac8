//! Structured logging with component and session context.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sink::{LogSink, StderrSink};

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Upper-case label used in human output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// One emitted record.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Emitting component, e.g. `selector` or `ledger-store`.
    pub component: String,
    /// Cart session for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Microseconds since the root logger was created.
    pub elapsed_us: u64,
}

impl LogEntry {
    /// Single-line JSON; falls back to the bare message.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[LEVEL] component: message | k=v k=v`.
    pub fn to_human(&self) -> String {
        let mut line = format!("[{}] {}: {}", self.level, self.component, self.message);
        let mut sep = " | ";
        for (key, value) in &self.fields {
            let _ = write!(line, "{}{}={}", sep, key, value);
            sep = " ";
        }
        line
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// How entries are rendered before reaching the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// `[LEVEL] component: message | fields`.
    Human,
}

/// Logger tagged with a component and, optionally, the cart session.
///
/// Clones share the sink and the start instant.
#[derive(Clone)]
pub struct StructuredLogger {
    component: String,
    session: Option<String>,
    start_time: std::time::Instant,
    min_level: LogLevel,
    format: LogFormat,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("component", &self.component)
            .field("session", &self.session)
            .field("min_level", &self.min_level)
            .field("format", &self.format)
            .finish()
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        Self::new("fitment")
    }
}

impl StructuredLogger {
    /// JSON to stderr at `Info` and above.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            session: None,
            start_time: std::time::Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: Arc::new(StderrSink),
        }
    }

    /// Derive a logger for another component, sharing sink and settings.
    pub fn child(&self, component: impl Into<String>) -> Self {
        let mut logger = self.clone();
        logger.component = component.into();
        logger
    }

    /// Set the cart session for correlation.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Route entries to a different sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Emit a message without fields.
    pub fn log(&self, level: LogLevel, message: &str) {
        self.emit(level, message.to_string(), BTreeMap::new());
    }

    fn emit(&self, level: LogLevel, message: String, fields: BTreeMap<String, Value>) {
        if !self.enabled(level) {
            return;
        }
        let entry = LogEntry {
            level,
            message,
            component: self.component.clone(),
            session: self.session.clone(),
            fields,
            elapsed_us: u64::try_from(self.start_time.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        let rendered = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        self.sink.write(&entry, &rendered);
    }

    /// Get the component name.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Check whether a level would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Entry under construction; nothing is written until [`LogBuilder::emit`].
#[must_use = "call .emit() to write the entry"]
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, Value>,
}

impl<'a> LogBuilder<'a> {
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Attach any JSON value.
    pub fn value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn field(self, key: &str, value: impl Into<String>) -> Self {
        self.value(key, value.into())
    }

    pub fn field_i64(self, key: &str, value: i64) -> Self {
        self.value(key, value)
    }

    pub fn field_bool(self, key: &str, value: bool) -> Self {
        self.value(key, value)
    }

    /// Attach the `Display` form of a value, typically an error.
    pub fn field_display(self, key: &str, value: &dyn fmt::Display) -> Self {
        self.value(key, value.to_string())
    }

    pub fn emit(self) {
        self.logger.emit(self.level, self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start an entry at `level`.
    pub fn at(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, level, message)
    }

    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Debug, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Warn, message)
    }

    pub fn error_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.at(LogLevel::Error, message)
    }
}
