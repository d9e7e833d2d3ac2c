//! Error types
//!
//! Startup failures are fatal and surface as `RelayError`. Everything that
//! happens on a live connection stays inside its session and is described by
//! `SessionEnd` instead.

use std::fmt;
use std::io;
use std::time::Duration;

/// Errors that stop the relay from starting
#[derive(Debug)]
pub enum RelayError {
    Bind { addr: String, source: io::Error },
    PresenceBind { addr: String, source: io::Error },
    Config(config::ConfigError),
    Io(io::Error),
}

impl RelayError {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        RelayError::Config(config::ConfigError::Message(msg.into()))
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Bind { addr, source } => {
                write!(f, "Failed to bind chat listener on {}: {}", addr, source)
            }
            RelayError::PresenceBind { addr, source } => {
                write!(f, "Failed to bind presence endpoint on {}: {}", addr, source)
            }
            RelayError::Config(e) => write!(f, "Configuration error: {}", e),
            RelayError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::Bind { source, .. } | RelayError::PresenceBind { source, .. } => {
                Some(source)
            }
            RelayError::Config(e) => Some(e),
            RelayError::Io(e) => Some(e),
        }
    }
}

impl From<config::ConfigError> for RelayError {
    fn from(error: config::ConfigError) -> Self {
        RelayError::Config(error)
    }
}

impl From<io::Error> for RelayError {
    fn from(error: io::Error) -> Self {
        RelayError::Io(error)
    }
}

/// Why a client session left its read loop.
///
/// Cleanup is the same for every variant.
#[derive(Debug)]
pub enum SessionEnd {
    PeerClosed,
    ReadFailed(io::Error),
    IdleTimeout(Duration),
    Shutdown,
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEnd::PeerClosed => write!(f, "peer closed the connection"),
            SessionEnd::ReadFailed(e) => write!(f, "read failed: {}", e),
            SessionEnd::IdleTimeout(limit) => {
                write!(f, "no frame received within {}s", limit.as_secs())
            }
            SessionEnd::Shutdown => write!(f, "relay shutting down"),
        }
    }
}
