//! Fan-out operations
//!
//! Works on a snapshot of the registry. A failed write is swallowed and the
//! recipient stays registered; its own session notices the broken connection.

use log::debug;
use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;

use crate::broadcast::results::FanoutResult;
use crate::client::ClientRegistry;
use crate::protocol::format_chat_message;

/// Sends `text` to every client except `sender`.
///
/// The sender's display name is read from the registry now, so a rename that
/// completed earlier is always visible.
pub async fn broadcast_message(
    registry: &ClientRegistry,
    sender: &SocketAddr,
    text: &str,
) -> FanoutResult {
    let mut result = FanoutResult::default();

    let Some(name) = registry.name_of(sender) else {
        debug!("Sender {} no longer registered, nothing to fan out", sender);
        return result;
    };
    let message = format_chat_message(&name, text);

    for (addr, writer) in registry.recipients(sender) {
        let mut stream = writer.lock().await;
        match stream.write_all(message.as_bytes()).await {
            Ok(()) => result.delivered.push(addr),
            Err(e) => {
                debug!("Dropped message from {} to {}: {}", sender, addr, e);
                result.failed.push(addr);
            }
        }
    }

    result
}
