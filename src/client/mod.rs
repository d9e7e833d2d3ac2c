//! Client management
//!
//! Tracks live connections and runs the per-connection protocol.

pub mod handler;
pub mod registry;
pub mod session;
pub mod state;

pub use handler::handle_client;
pub use registry::ClientRegistry;
pub use session::{ClientSession, SessionContext};
pub use state::{ClientEntry, SharedWriter};
