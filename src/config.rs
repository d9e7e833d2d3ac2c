//! Configuration management for the chat relay
//!
//! Values come from built-in defaults, an optional `config.toml` and
//! `CHAT_RELAY_*` environment overrides, in that order of precedence.
//! The defaults reproduce the fixed ports the relay has always used.

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::error::RelayError;

pub const DEFAULT_CHAT_PORT: u16 = 5000;
pub const DEFAULT_PRESENCE_PORT: u16 = 5001;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Complete relay configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RelayConfig {
    // ═══ NETWORK ═══
    /// IP address both the chat listener and the presence endpoint bind to
    pub bind_address: String,

    /// TCP port for the chat channel
    pub chat_port: u16,

    // ═══ PRESENCE ═══
    /// Whether the UDP presence capability runs at all
    pub presence_enabled: bool,

    /// UDP port for presence announcements
    pub presence_port: u16,

    /// Include the limited broadcast address in announce targets
    pub presence_broadcast: bool,

    /// Extra unicast targets (`ip:port`) that receive every announcement
    pub presence_peers: Vec<String>,

    // ═══ SESSION BEHAVIOR ═══
    /// Bytes per read. One read is one message, so this caps frame size.
    pub read_buffer_size: usize,

    /// Per-frame read timeout in seconds, 0 disables it
    pub idle_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            chat_port: DEFAULT_CHAT_PORT,
            presence_enabled: true,
            presence_port: DEFAULT_PRESENCE_PORT,
            presence_broadcast: true,
            presence_peers: Vec::new(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            idle_timeout_secs: 0,
        }
    }
}

/// `CHAT_RELAY_*` overrides; `presence_peers` takes a comma-separated list.
///
/// `vars` replaces the process environment when given.
fn environment(vars: Option<config::Map<String, String>>) -> Environment {
    Environment::with_prefix("CHAT_RELAY")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("presence_peers")
        .source(vars)
}

impl RelayConfig {
    /// Load configuration from `config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, RelayError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(environment(None))
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a TOML document, falling back to defaults
    pub fn from_toml(source: &str) -> Result<Self, RelayError> {
        let settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, RelayError> {
        let config: RelayConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), RelayError> {
        if self.bind_address.parse::<IpAddr>().is_err() {
            return Err(RelayError::invalid_config(format!(
                "bind_address is not an IP address: {}",
                self.bind_address
            )));
        }

        if self.read_buffer_size == 0 {
            return Err(RelayError::invalid_config(
                "read_buffer_size must be greater than 0",
            ));
        }

        self.presence_peer_addrs()?;
        Ok(())
    }

    /// Chat listener address as `host:port`
    pub fn chat_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.chat_port)
    }

    /// Presence endpoint address as `host:port`
    pub fn presence_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.presence_port)
    }

    /// Read timeout per frame, `None` when disabled
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    pub fn presence_peer_addrs(&self) -> Result<Vec<SocketAddr>, RelayError> {
        self.presence_peers
            .iter()
            .map(|peer| {
                peer.parse::<SocketAddr>().map_err(|_| {
                    RelayError::invalid_config(format!("presence peer is not ip:port: {peer}"))
                })
            })
            .collect()
    }
}
