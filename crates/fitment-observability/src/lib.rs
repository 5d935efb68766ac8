//! Structured logging for the fitment widgets.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component and session context
//! - `LogBuilder` - Fluent construction of entries with typed fields
//! - `LogSink` - Output targets: stderr, `tracing`, in-memory capture

mod logging;
mod sink;

pub use logging::*;
pub use sink::*;
