//! Presence notifier
//!
//! Owns the relay's single UDP endpoint. Announcements go to the broadcast
//! address, loopback and any configured peers, each independently.

use log::{debug, warn};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::presence::event::{PresenceEvent, PresenceStatus};
use crate::utils::SharedSink;

pub struct PresenceNotifier {
    socket: Arc<UdpSocket>,
    targets: Vec<SocketAddr>,
    sink: SharedSink,
}

impl PresenceNotifier {
    /// Binds the presence endpoint. Failure here is fatal for the relay.
    pub async fn bind(config: &RelayConfig, sink: SharedSink) -> Result<Self, RelayError> {
        let addr = config.presence_socket();
        let socket = UdpSocket::bind(&addr)
            .await
            .map_err(|source| RelayError::PresenceBind {
                addr: addr.clone(),
                source,
            })?;

        if config.presence_broadcast {
            if let Err(e) = socket.set_broadcast(true) {
                warn!("Unable to enable broadcast on {}: {}", addr, e);
            }
        }

        // Announce on the port actually bound, which matters when it was 0.
        let port = socket.local_addr()?.port();
        let mut targets = Vec::new();
        if config.presence_broadcast {
            targets.push(SocketAddr::from((Ipv4Addr::BROADCAST, port)));
        }
        targets.push(SocketAddr::from((Ipv4Addr::LOCALHOST, port)));
        targets.extend(config.presence_peer_addrs()?);

        debug!("Presence endpoint {} announcing to {:?}", addr, targets);

        Ok(Self {
            socket: Arc::new(socket),
            targets,
            sink,
        })
    }

    /// Sends `"{name} {status}"` to every target. Returns how many sends
    /// succeeded; failures are logged and otherwise ignored.
    pub async fn announce(&self, name: &str, status: PresenceStatus) -> usize {
        let payload = PresenceEvent::new(name, status).encode();
        let mut sent = 0;

        for target in &self.targets {
            match self.socket.send_to(payload.as_bytes(), target).await {
                Ok(_) => sent += 1,
                Err(e) => self
                    .sink
                    .append_error(&format!("presence send error to {}: {}", target, e)),
            }
        }

        sent
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn targets(&self) -> &[SocketAddr] {
        &self.targets
    }

    /// The endpoint shared with the receive loop.
    pub fn socket(&self) -> Arc<UdpSocket> {
        Arc::clone(&self.socket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemorySink;
    use std::time::Duration;

    fn local_config(peers: Vec<String>) -> RelayConfig {
        RelayConfig {
            bind_address: "127.0.0.1".into(),
            presence_port: 0,
            presence_broadcast: false,
            presence_peers: peers,
            ..RelayConfig::default()
        }
    }

    async fn recv_text(socket: &UdpSocket) -> String {
        let mut buf = [0u8; 512];
        let (n, _) = tokio::time::timeout(Duration::from_secs(2), socket.recv_from(&mut buf))
            .await
            .expect("no datagram arrived")
            .unwrap();
        String::from_utf8_lossy(&buf[..n]).into_owned()
    }

    #[tokio::test]
    async fn targets_loopback_on_bound_port_and_peers() {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let peer_addr = peer.local_addr().unwrap();
        let notifier = PresenceNotifier::bind(
            &local_config(vec![peer_addr.to_string()]),
            Arc::new(MemorySink::new()),
        )
        .await
        .unwrap();

        let port = notifier.local_addr().unwrap().port();
        assert_ne!(port, 0);
        assert_eq!(
            notifier.targets(),
            &[SocketAddr::from((Ipv4Addr::LOCALHOST, port)), peer_addr]
        );
    }

    #[tokio::test]
    async fn announcements_reach_peer_and_self() {
        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let sink = Arc::new(MemorySink::new());
        let notifier = PresenceNotifier::bind(
            &local_config(vec![peer.local_addr().unwrap().to_string()]),
            sink.clone(),
        )
        .await
        .unwrap();

        assert_eq!(notifier.announce("Alice", PresenceStatus::Online).await, 2);
        assert_eq!(recv_text(&peer).await, "Alice ONLINE");
        assert_eq!(recv_text(&notifier.socket()).await, "Alice ONLINE");

        notifier.announce("Alice", PresenceStatus::Offline).await;
        assert_eq!(recv_text(&peer).await, "Alice OFFLINE");
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn port_in_use_is_a_bind_error() {
        let taken = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let config = RelayConfig {
            presence_port: taken.local_addr().unwrap().port(),
            ..local_config(Vec::new())
        };

        let err = PresenceNotifier::bind(&config, Arc::new(MemorySink::new()))
            .await
            .err()
            .expect("second bind must fail");
        assert!(matches!(err, RelayError::PresenceBind { .. }));
    }
}
