//! Broadcast fan-out
//!
//! Delivers one sender's chat message to every other registered client.

pub mod operations;
pub mod results;

pub use operations::broadcast_message;
pub use results::FanoutResult;
