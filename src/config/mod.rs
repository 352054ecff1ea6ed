//! Configuration system for dockhand.
//!
//! This module provides the configuration structures, CLI definitions and the
//! layered loader. Precedence (lowest to highest): application defaults,
//! configuration file, environment variables, command-line flags.
//!
//! The configuration file is discovered through `--config`, then
//! `DOCKHAND_CONFIG_PATH`, then `.dockhand.toml`, then
//! `~/.config/dockhand/config.toml`.
//!
//! # Example Configuration
//!
//! ```toml
//! engine_socket = "unix:///var/run/docker.sock"
//!
//! [server]
//! bind_address = "0.0.0.0"
//! port = 8090
//! request_timeout_secs = 120
//! cors_allowed_origins = ["http://localhost:4200"]
//!
//! [logging]
//! level = "info"
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands};
pub use loader::{env_var_names, load_config};
pub use types::{AppConfig, LoggingConfig, ServerConfig};
