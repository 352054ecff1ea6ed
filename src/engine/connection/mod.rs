//! Socket resolution and container engine connection.
//!
//! Endpoints are resolved from configuration, then from the conventional
//! engine environment variables, then from the platform default. Connections
//! are opened with `bollard` and connection failures are classified into
//! [`EngineError`] variants that name the socket involved.

mod error_classification;
mod health_check;

use bollard::Docker;
use tracing::debug;

use crate::error::DockhandError;

pub use health_check::{HEALTH_CHECK_TIMEOUT_SECS, ping_with_timeout};

/// Environment variable names checked in fallback order after configuration sources.
const FALLBACK_ENV_VARS: &[&str] = &["DOCKER_HOST", "CONTAINER_HOST", "PODMAN_HOST"];

/// Connection timeout in seconds for Docker/Podman API connections.
const CONNECTION_TIMEOUT_SECS: u64 = 120;

/// Default socket path for Unix platforms.
#[cfg(unix)]
const DEFAULT_SOCKET: &str = "unix:///var/run/docker.sock";

/// Default socket path for Windows platforms.
#[cfg(windows)]
const DEFAULT_SOCKET: &str = "npipe:////./pipe/docker_engine";

/// Resolves container engine socket endpoints from environment variables.
///
/// # Type Parameters
///
/// * `E` - An environment provider implementing the `mockable::Env` trait,
///   allowing for testable environment variable access.
pub struct SocketResolver<'a, E: mockable::Env> {
    env: &'a E,
}

impl<'a, E: mockable::Env> SocketResolver<'a, E> {
    /// Creates a new socket resolver with the given environment provider.
    #[must_use]
    pub const fn new(env: &'a E) -> Self {
        Self { env }
    }

    /// Resolves the socket endpoint from `DOCKER_HOST`, `CONTAINER_HOST` or
    /// `PODMAN_HOST`, in that order, skipping empty values.
    #[must_use]
    pub fn resolve_from_env(&self) -> Option<String> {
        FALLBACK_ENV_VARS
            .iter()
            .filter_map(|var_name| self.env.string(var_name))
            .find(|value| !value.is_empty())
    }

    /// Returns the platform default socket path.
    #[must_use]
    pub const fn default_socket() -> &'static str {
        DEFAULT_SOCKET
    }
}

/// Classifies socket endpoint types for connection handling.
enum SocketType {
    /// Unix socket or Windows named pipe with explicit scheme.
    Socket,
    /// HTTP, HTTPS, or TCP endpoint (TCP is rewritten to HTTP).
    Http,
    /// Bare path without scheme prefix.
    BarePath,
}

impl SocketType {
    fn classify(socket: &str) -> Self {
        if socket.starts_with("unix://") || socket.starts_with("npipe://") {
            Self::Socket
        } else if ["tcp://", "http://", "https://"]
            .iter()
            .any(|scheme| socket.starts_with(scheme))
        {
            Self::Http
        } else {
            Self::BarePath
        }
    }
}

/// Opens connections to Docker or Podman container engines.
pub struct EngineConnector;

impl EngineConnector {
    /// Connect to the container engine at the specified endpoint.
    ///
    /// Supports `unix://` sockets, `npipe://` named pipes, `tcp://`, `http://`
    /// and `https://` endpoints, and bare paths. Bare paths starting with `\\`
    /// or `//` are treated as named pipes; all other bare paths as Unix
    /// sockets.
    ///
    /// Opening a client does not contact the engine; an unreachable endpoint
    /// surfaces on the first call.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::SocketNotFound`, `EngineError::PermissionDenied`
    /// or `EngineError::ConnectionFailed` if the client cannot be created.
    pub fn connect(socket: &str) -> Result<Docker, DockhandError> {
        let (socket_type, endpoint) = match SocketType::classify(socket) {
            SocketType::Http => (SocketType::Http, socket.replacen("tcp://", "http://", 1)),
            SocketType::Socket => (SocketType::Socket, socket.to_owned()),
            SocketType::BarePath => (SocketType::Socket, Self::normalize_bare_path(socket)),
        };

        debug!(socket = %endpoint, "opening container engine client");
        let result = match socket_type {
            SocketType::Http => Docker::connect_with_http(
                &endpoint,
                CONNECTION_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ),
            SocketType::Socket | SocketType::BarePath => Docker::connect_with_socket(
                &endpoint,
                CONNECTION_TIMEOUT_SECS,
                bollard::API_DEFAULT_VERSION,
            ),
        };

        result.map_err(|error| {
            DockhandError::from(error_classification::classify_connection_error(
                &error, &endpoint,
            ))
        })
    }

    /// Prefix a bare socket path with `npipe://` or `unix://` based on its
    /// syntax, not the current platform.
    fn normalize_bare_path(path: &str) -> String {
        if path.starts_with("\\\\") || path.starts_with("//") {
            format!("npipe://{path}")
        } else {
            format!("unix://{path}")
        }
    }

    /// Resolves the socket endpoint without establishing a connection.
    ///
    /// Resolution order:
    /// 1. `config_socket` (from CLI, config file, or `DOCKHAND_ENGINE_SOCKET`)
    /// 2. `DOCKER_HOST`, `CONTAINER_HOST`, `PODMAN_HOST` (via resolver)
    /// 3. Platform default socket
    #[must_use]
    pub fn resolve_socket<E: mockable::Env>(
        config_socket: Option<&str>,
        resolver: &SocketResolver<'_, E>,
    ) -> String {
        config_socket
            .filter(|socket| !socket.trim().is_empty())
            .map(String::from)
            .or_else(|| resolver.resolve_from_env())
            .unwrap_or_else(|| SocketResolver::<E>::default_socket().to_owned())
    }
}
