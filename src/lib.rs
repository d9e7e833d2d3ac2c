pub mod broadcast;
pub mod client;
pub mod config;
pub mod error;
pub mod presence;
pub mod protocol;
pub mod server;
pub mod utils;

pub use crate::config::RelayConfig;
pub use crate::error::RelayError;
pub use crate::server::Server;
