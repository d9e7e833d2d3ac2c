//! Utility functions
//!
//! Provides logging setup and the log sink every relay component writes to.

pub mod logging;

pub use logging::{LogCrateSink, LogSink, MemorySink, SharedSink};
