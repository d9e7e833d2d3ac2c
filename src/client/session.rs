//! Client session lifecycle
//!
//! `ClientSession` exists only between registration and cleanup. Opening it
//! registers and announces the client; `close` consumes it, so the registry
//! removal and the OFFLINE announcement can only ever happen once.

use log::{debug, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::tcp::OwnedWriteHalf;
use tokio_util::sync::CancellationToken;

use crate::client::registry::ClientRegistry;
use crate::client::state::ClientEntry;
use crate::error::SessionEnd;
use crate::presence::{PresenceNotifier, PresenceStatus};
use crate::utils::SharedSink;

/// Everything a session shares with the rest of the relay.
#[derive(Clone)]
pub struct SessionContext {
    pub registry: Arc<ClientRegistry>,
    pub presence: Option<Arc<PresenceNotifier>>,
    pub sink: SharedSink,
    pub read_buffer_size: usize,
    pub idle_timeout: Option<Duration>,
    pub shutdown: CancellationToken,
}

/// A named, registered connection.
pub struct ClientSession {
    addr: SocketAddr,
    name: String,
}

impl ClientSession {
    /// Registers the client under its initial name and announces it.
    pub async fn open(
        addr: SocketAddr,
        name: String,
        writer: OwnedWriteHalf,
        ctx: &SessionContext,
    ) -> Self {
        if !ctx
            .registry
            .register(addr, ClientEntry::new(name.clone(), writer))
        {
            warn!("Client {} was already registered", addr);
        }

        ctx.sink.append(&format!("connected: {}", name));
        if let Some(presence) = &ctx.presence {
            presence.announce(&name, PresenceStatus::Online).await;
        }

        Self { addr, name }
    }

    /// Last name this session set.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, new_name: String, ctx: &SessionContext) {
        ctx.registry.rename(&self.addr, new_name.clone());
        ctx.sink
            .append(&format!("{} changed login to: {}", self.name, new_name));
        self.name = new_name;
    }

    /// Unregisters the client and announces its departure.
    ///
    /// Dropping the entry releases this session's hold on the write half;
    /// the socket closes once any in-flight fan-out write lets go of it.
    pub async fn close(self, end: SessionEnd, ctx: &SessionContext) {
        if ctx.registry.remove(&self.addr).is_none() {
            warn!("Client {} was not registered at close", self.addr);
        }
        debug!("Session {} ({}) ended: {}", self.addr, self.name, end);

        ctx.sink.append(&format!("disconnected: {}", self.name));
        if let Some(presence) = &ctx.presence {
            presence.announce(&self.name, PresenceStatus::Offline).await;
        }
    }
}
