//! Presence receive loop
//!
//! Runs for the life of the relay, logging every peer that announces itself
//! online. Receive errors are logged and the loop keeps going until shutdown.

use log::debug;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

use crate::presence::event::parse_announcement;
use crate::protocol::decode_frame;
use crate::utils::SharedSink;

/// Largest payload a UDP datagram can carry
const MAX_DATAGRAM: usize = 65_507;

pub async fn run_presence_listener(
    socket: Arc<UdpSocket>,
    sink: SharedSink,
    shutdown: CancellationToken,
) {
    let mut buf = vec![0u8; MAX_DATAGRAM];

    loop {
        let received = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut buf) => received,
        };

        match received {
            Ok((n, from)) => {
                let payload = decode_frame(&buf[..n]);
                match parse_announcement(&payload) {
                    Some(name) => {
                        sink.append(&format!("new peer {} announced itself online", name))
                    }
                    None => debug!("Ignoring presence datagram from {}: {:?}", from, payload),
                }
            }
            Err(e) => {
                if shutdown.is_cancelled() {
                    break;
                }
                sink.append_error(&format!("presence error: {}", e));
            }
        }
    }

    debug!("Presence listener stopped");
}
