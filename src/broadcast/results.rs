//! Fan-out result types

use std::net::SocketAddr;

/// Outcome of one fan-out call. Nothing here is reported back to clients.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FanoutResult {
    pub delivered: Vec<SocketAddr>,
    pub failed: Vec<SocketAddr>,
}

impl FanoutResult {
    /// Number of recipients attempted.
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}
