//! Module `state`
//!
//! Defines `ClientEntry`, the registry's per-connection record: the current
//! display name and the write side of the connection.

use std::sync::Arc;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;

/// Write half of a client connection, shared between fan-out calls.
///
/// The mutex serializes concurrent broadcasts so frames never interleave.
pub type SharedWriter = Arc<Mutex<OwnedWriteHalf>>;

/// A live, named connection.
pub struct ClientEntry {
    name: String,
    writer: SharedWriter,
}

impl ClientEntry {
    pub fn new(name: String, writer: OwnedWriteHalf) -> Self {
        Self {
            name,
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Returns the current display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the shared write half of the connection.
    pub fn writer(&self) -> &SharedWriter {
        &self.writer
    }

    /// Replaces the display name, returning the previous one.
    pub fn set_name(&mut self, name: String) -> String {
        std::mem::replace(&mut self.name, name)
    }
}
