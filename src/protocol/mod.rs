//! Chat protocol
//!
//! The chat channel is unframed: one read is one message. This module turns
//! a frame into a `Command` and renders what the relay sends back out.

pub mod commands;
pub mod responses;

pub use commands::{Command, RENAME_PREFIX, decode_frame, parse_command};
pub use responses::{CHAT_PREFIX, format_chat_message};
