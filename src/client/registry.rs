//! Client registry
//!
//! Maps each live connection to its current display name. Keyed by peer
//! address because names change and need not be unique.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::net::SocketAddr;

use crate::client::state::{ClientEntry, SharedWriter};

/// Registry of active clients.
///
/// Sharded, so sessions of unrelated connections never contend on one lock.
/// No method holds a shard guard across an `.await`.
#[derive(Default)]
pub struct ClientRegistry {
    clients: DashMap<SocketAddr, ClientEntry>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: DashMap::new(),
        }
    }

    /// Inserts a new client. Returns `false` and leaves the existing entry
    /// alone if `addr` is already registered.
    pub fn register(&self, addr: SocketAddr, entry: ClientEntry) -> bool {
        match self.clients.entry(addr) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    /// Atomically replaces the display name, returning the old one.
    pub fn rename(&self, addr: &SocketAddr, name: String) -> Option<String> {
        self.clients
            .get_mut(addr)
            .map(|mut entry| entry.set_name(name))
    }

    /// Current display name of `addr`, read at call time.
    pub fn name_of(&self, addr: &SocketAddr) -> Option<String> {
        self.clients.get(addr).map(|entry| entry.name().to_string())
    }

    /// Point-in-time snapshot of every writer except the sender's.
    pub fn recipients(&self, sender: &SocketAddr) -> Vec<(SocketAddr, SharedWriter)> {
        self.clients
            .iter()
            .filter(|entry| entry.key() != sender)
            .map(|entry| (*entry.key(), entry.value().writer().clone()))
            .collect()
    }

    pub fn remove(&self, addr: &SocketAddr) -> Option<ClientEntry> {
        self.clients.remove(addr).map(|(_, entry)| entry)
    }

    pub fn contains(&self, addr: &SocketAddr) -> bool {
        self.clients.contains_key(addr)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Display names of all registered clients, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.clients
            .iter()
            .map(|entry| entry.name().to_string())
            .collect()
    }
}
