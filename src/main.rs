//! Chat relay - Entry Point
//!
//! Relays short text messages between TCP clients and announces their
//! presence over UDP.

use log::{error, info, warn};
use std::process;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use chat_relay::utils::logging::setup_logging;
use chat_relay::utils::{LogCrateSink, SharedSink};
use chat_relay::{RelayConfig, Server};

#[tokio::main]
async fn main() {
    setup_logging();

    info!("Launching chat relay...");

    let config = match RelayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let sink: SharedSink = Arc::new(LogCrateSink);
    let server = match Server::bind(config, sink).await {
        Ok(server) => server,
        // Already reported through the sink.
        Err(_) => process::exit(1),
    };

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested");
                signal.cancel();
            }
            Err(e) => warn!("Unable to listen for shutdown signal: {}", e),
        }
    });

    server.run(shutdown).await;
}
