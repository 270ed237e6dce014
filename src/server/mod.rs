pub mod config;
mod http_layers;
mod playback_routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{build_relay, make_app, run_server};
