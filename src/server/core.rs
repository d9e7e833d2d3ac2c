use log::{debug, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::client::{ClientRegistry, SessionContext, handle_client};
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::presence::{PresenceNotifier, run_presence_listener};
use crate::utils::SharedSink;

pub struct Server {
    listener: TcpListener,
    registry: Arc<ClientRegistry>,
    presence: Option<Arc<PresenceNotifier>>,
    sink: SharedSink,
    config: RelayConfig,
}

impl Server {
    /// Binds every socket the relay needs.
    ///
    /// A bind failure is reported once through the sink and returned; there
    /// is no retry.
    pub async fn bind(config: RelayConfig, sink: SharedSink) -> Result<Self, RelayError> {
        match Self::bind_sockets(&config, &sink).await {
            Ok((listener, presence)) => Ok(Self {
                listener,
                registry: Arc::new(ClientRegistry::new()),
                presence,
                sink,
                config,
            }),
            Err(e) => {
                sink.append_error(&format!("server error: {}", e));
                Err(e)
            }
        }
    }

    async fn bind_sockets(
        config: &RelayConfig,
        sink: &SharedSink,
    ) -> Result<(TcpListener, Option<Arc<PresenceNotifier>>), RelayError> {
        let addr = config.chat_socket();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| RelayError::Bind {
                addr: addr.clone(),
                source,
            })?;
        info!("Chat listener bound to {}", listener.local_addr()?);

        let presence = if config.presence_enabled {
            let notifier = PresenceNotifier::bind(config, sink.clone()).await?;
            info!("Presence endpoint bound to {}", notifier.local_addr()?);
            Some(Arc::new(notifier))
        } else {
            None
        };

        Ok((listener, presence))
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Bound presence endpoint, if presence is enabled.
    pub fn presence_addr(&self) -> Option<SocketAddr> {
        self.presence
            .as_ref()
            .and_then(|presence| presence.local_addr().ok())
    }

    pub fn registry(&self) -> Arc<ClientRegistry> {
        Arc::clone(&self.registry)
    }

    /// Accepts clients until `shutdown` is cancelled.
    ///
    /// Cancellation stops the accept loop, releases the listener, stops the
    /// presence loop and makes every session leave its read loop. Returns
    /// once all of them have finished their cleanup.
    pub async fn run(self, shutdown: CancellationToken) {
        let Server {
            listener,
            registry,
            presence,
            sink,
            config,
        } = self;

        let tasks = TaskTracker::new();
        if let Some(presence) = &presence {
            tasks.spawn(run_presence_listener(
                presence.socket(),
                sink.clone(),
                shutdown.clone(),
            ));
        }

        let ctx = SessionContext {
            registry,
            presence,
            sink: sink.clone(),
            read_buffer_size: config.read_buffer_size,
            idle_timeout: config.idle_timeout(),
            shutdown: shutdown.clone(),
        };

        sink.append("server started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        debug!("Accepted connection from {}", addr);
                        // Spawn a task for each client so accept loop doesn't block
                        tasks.spawn(handle_client(stream, addr, ctx.clone()));
                    }
                    Err(e) => sink.append_error(&format!("server error: {}", e)),
                },
            }
        }

        drop(listener);
        drop(ctx);
        tasks.close();
        tasks.wait().await;

        sink.append("server stopped");
    }
}
