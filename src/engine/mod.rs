//! Container engine access.
//!
//! This module resolves and opens connections to Docker or Podman engines and
//! implements the adapter operations the HTTP handlers call. The socket
//! endpoint is resolved through a priority-based fallback chain:
//!
//! 1. CLI argument (`--engine-socket`)
//! 2. `DOCKHAND_ENGINE_SOCKET` environment variable
//! 3. Config file (`engine_socket` in TOML)
//! 4. `DOCKER_HOST` environment variable
//! 5. `CONTAINER_HOST` environment variable
//! 6. `PODMAN_HOST` environment variable
//! 7. Platform default (`/var/run/docker.sock` on Unix)
//!
//! Every adapter operation takes a client opened for the current request and
//! re-reads engine state; nothing is cached between requests.

pub mod bulk;
mod client;
mod connection;
pub mod containers;
mod failure;
pub mod images;
pub mod networks;
mod records;
mod views;
pub mod volumes;

#[cfg(test)]
pub(crate) mod test_support;

pub use bulk::{BulkEntry, BulkOutcome, BulkReport, BulkSummary};
pub use client::{EngineClient, EngineFactory, EngineFuture, SocketEngineFactory};
pub use connection::{
    EngineConnector, HEALTH_CHECK_TIMEOUT_SECS, SocketResolver, ping_with_timeout,
};
pub use containers::LifecycleOutcome;
pub use records::{
    ContainerRecord, ImageRecord, LogOptions, NetworkRecord, StatsSample, VolumeRecord,
};
pub use views::{
    ContainerLogsView, ContainerStatsView, ContainerView, DanglingImageView, ImageView,
    NetworkContainerView, NetworkView, VolumeView,
};
