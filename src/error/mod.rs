//! Error handling
//!
//! Defines the relay's error type and the reasons a session can end.

pub mod types;

pub use types::*;
