//! Logging utilities
//!
//! Diagnostics go straight to the `log` macros. Human-readable relay events
//! (connects, renames, chat lines, presence) go through a `LogSink` owned by
//! whatever hosts the relay, so the core never assumes a rendering target.

use std::sync::{Arc, Mutex};

/// Target used when sink lines are forwarded to the `log` crate
pub const SINK_TARGET: &str = "chat_relay";

/// Setup logging for the relay binary.
///
/// Defaults to `info` unless `RUST_LOG` says otherwise.
pub fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Receives formatted relay event lines. Must be cheap and never block for long.
pub trait LogSink: Send + Sync {
    fn append(&self, line: &str);

    /// Error lines. Sinks that do not distinguish severity can ignore this.
    fn append_error(&self, line: &str) {
        self.append(line);
    }
}

pub type SharedSink = Arc<dyn LogSink>;

/// Forwards sink lines to the `log` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn append(&self, line: &str) {
        log::info!(target: SINK_TARGET, "{}", line);
    }

    fn append_error(&self, line: &str) {
        log::error!(target: SINK_TARGET, "{}", line);
    }
}

/// Keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all lines received so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.count(line) > 0
    }

    /// Number of lines exactly equal to `line`
    pub fn count(&self, line: &str) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|l| l.as_str() == line)
            .count()
    }
}

impl LogSink for MemorySink {
    fn append(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }
}
