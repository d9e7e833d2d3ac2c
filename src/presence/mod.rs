//! Presence notifications
//!
//! Optional, best-effort UDP side channel. The relay announces its clients
//! coming and going, and logs announcements it hears from peers.

pub mod event;
pub mod listener;
pub mod notifier;

pub use event::{PresenceEvent, PresenceStatus, parse_announcement};
pub use listener::run_presence_listener;
pub use notifier::PresenceNotifier;
