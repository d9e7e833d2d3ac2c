//! Outbound chat messages
//!
//! Recipients see `От {name}: {text}` with the sender's text unmodified.

/// Leading marker of every relayed chat message
pub const CHAT_PREFIX: &str = "От ";

pub fn format_chat_message(name: &str, text: &str) -> String {
    format!("{CHAT_PREFIX}{name}: {text}")
}
