use log::debug;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tokio::time;

use crate::broadcast::broadcast_message;
use crate::client::session::{ClientSession, SessionContext};
use crate::error::SessionEnd;
use crate::protocol::{Command, decode_frame, parse_command};

/// Runs one client connection from first frame to cleanup.
///
/// - The first frame, trimmed, names the client (empty names are allowed).
/// - Later frames are either `/login <name>` renames or chat to fan out.
/// - EOF, a read error, the idle timeout or shutdown all end the session
///   through the same cleanup path.
///
/// A client that disconnects before sending anything is never registered.
pub async fn handle_client(stream: TcpStream, client_addr: SocketAddr, ctx: SessionContext) {
    let (mut reader, writer) = stream.into_split();
    let mut buf = vec![0u8; ctx.read_buffer_size];

    let name = match next_frame(&mut reader, &mut buf, &ctx).await {
        Ok(frame) => frame.trim().to_string(),
        Err(end) => {
            debug!("Client {} left before naming itself: {}", client_addr, end);
            return;
        }
    };

    let mut session = ClientSession::open(client_addr, name, writer, &ctx).await;

    let end = loop {
        let frame = match next_frame(&mut reader, &mut buf, &ctx).await {
            Ok(frame) => frame,
            Err(end) => break end,
        };

        match parse_command(&frame) {
            Command::Rename(new_name) => session.rename(new_name, &ctx),
            Command::EmptyRename => ctx.sink.append_error(&format!(
                "error: empty login after /login command from {}",
                client_addr
            )),
            Command::Chat(text) => {
                ctx.sink
                    .append(&format!("from {}: {}", session.name(), text));
                // A recipient that stopped reading can block a write forever.
                let result = tokio::select! {
                    _ = ctx.shutdown.cancelled() => break SessionEnd::Shutdown,
                    result = broadcast_message(&ctx.registry, &client_addr, &text) => result,
                };
                debug!(
                    "Fan-out from {}: {} delivered, {} failed",
                    client_addr,
                    result.delivered.len(),
                    result.failed.len()
                );
            }
        }
    };

    session.close(end, &ctx).await;
}

/// Waits for the next frame, or for whatever ends the session first.
async fn next_frame(
    reader: &mut OwnedReadHalf,
    buf: &mut [u8],
    ctx: &SessionContext,
) -> Result<String, SessionEnd> {
    tokio::select! {
        _ = ctx.shutdown.cancelled() => Err(SessionEnd::Shutdown),
        frame = read_frame(reader, buf, ctx.idle_timeout) => frame,
    }
}

/// One read is one frame; anything beyond `buf.len()` arrives in the next read.
async fn read_frame(
    reader: &mut OwnedReadHalf,
    buf: &mut [u8],
    idle_timeout: Option<Duration>,
) -> Result<String, SessionEnd> {
    let read = match idle_timeout {
        Some(limit) => match time::timeout(limit, reader.read(buf)).await {
            Ok(read) => read,
            Err(_) => return Err(SessionEnd::IdleTimeout(limit)),
        },
        None => reader.read(buf).await,
    };

    match read {
        Ok(0) => Err(SessionEnd::PeerClosed),
        Ok(n) => Ok(decode_frame(&buf[..n])),
        Err(e) => Err(SessionEnd::ReadFailed(e)),
    }
}
