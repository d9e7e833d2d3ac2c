//! Presence datagram format
//!
//! A datagram is `"{name} ONLINE"` or `"{name} OFFLINE"`. No sequence number,
//! no acknowledgement.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Offline,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::Online => "ONLINE",
            PresenceStatus::Offline => "OFFLINE",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEvent {
    pub name: String,
    pub status: PresenceStatus,
}

impl PresenceEvent {
    pub fn new(name: impl Into<String>, status: PresenceStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }

    /// Datagram payload for this event
    pub fn encode(&self) -> String {
        format!("{} {}", self.name, self.status)
    }
}

/// Extracts the peer name from an incoming ONLINE announcement.
///
/// This is a plain suffix match on the trimmed payload: anything ending in
/// `ONLINE` counts, and OFFLINE announcements are not reported.
pub fn parse_announcement(payload: &str) -> Option<&str> {
    payload
        .trim()
        .strip_suffix(PresenceStatus::Online.as_str())
        .map(str::trim)
}
