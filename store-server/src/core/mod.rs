//! Core server modules
//!
//! - [`config`] - environment-driven configuration
//! - [`state`] - dependency-injected service handles
//! - [`server`] - HTTP server assembly

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
