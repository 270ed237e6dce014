//! Playback relay library
//!
//! Exposes the relay's modules so the binary and the end-to-end tests can
//! assemble the server.

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod playback;
pub mod profile;
pub mod provider;
pub mod relay;
pub mod server;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use error::RelayError;
pub use relay::PlaybackRelay;
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
