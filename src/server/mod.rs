//! Server core functionality
//!
//! Binds the chat listener (and presence endpoint), accepts connections and
//! spawns a session for each one.

pub mod core;

pub use core::Server;
