//! Semantic error types for the dockhand application.
//!
//! This module defines the error hierarchy for dockhand, following the principle of
//! using semantic error enums (via `thiserror`) for conditions the caller might
//! inspect, retry, or map to an HTTP status, while reserving opaque errors
//! (`eyre::Report`) for the application boundary.
//!
//! Every error can be reduced to an [`ErrorClass`], the four-way taxonomy the
//! HTTP surface maps onto status codes.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found at the expected path.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path where the configuration file was expected.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error during configuration loading.
    ///
    /// This wraps errors from the layered configuration system, including:
    /// - Configuration file parsing errors
    /// - Environment variable parsing errors
    /// - Missing required fields after layer merging
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised while validating an incoming request, before the engine is
/// contacted.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request body was not valid JSON for the expected shape.
    #[error("invalid request body: {message}")]
    MalformedBody {
        /// A description of the decoding failure.
        message: String,
    },

    /// A required field was absent, empty, or whitespace-only.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },
}

/// The kind of engine resource an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A container.
    Container,
    /// An image.
    Image,
    /// A network.
    Network,
    /// A volume.
    Volume,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Container => "container",
            Self::Image => "image",
            Self::Network => "network",
            Self::Volume => "volume",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while talking to the container engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Failed to connect to the container engine socket.
    #[error("failed to connect to container engine: {message}")]
    ConnectionFailed {
        /// A description of the connection failure.
        message: String,
    },

    /// The container engine socket was not found.
    #[error("container engine socket not found: {path}")]
    SocketNotFound {
        /// The path where the socket was expected.
        path: PathBuf,
    },

    /// Permission denied when accessing the container engine socket.
    #[error("permission denied accessing container socket: {path}")]
    PermissionDenied {
        /// The path to the socket.
        path: PathBuf,
    },

    /// The identifier does not resolve on the engine.
    #[error("failed to {operation} '{id}': no such {kind}")]
    NotFound {
        /// The operation that was attempted, e.g. `start container`.
        operation: String,
        /// The kind of resource that was looked up.
        kind: ResourceKind,
        /// The identifier that did not resolve.
        id: String,
    },

    /// The container is running and the requested operation requires it to
    /// be stopped.
    #[error("cannot {operation} '{id}': container is running")]
    ContainerRunning {
        /// The operation that was refused.
        operation: String,
        /// The identifier of the running container.
        id: String,
    },

    /// The engine rejected or failed a call on a single resource.
    #[error("failed to {operation} '{id}': {message}")]
    OperationFailed {
        /// The operation that failed, e.g. `remove image`.
        operation: String,
        /// The identifier of the target resource.
        id: String,
        /// A short description of the failure.
        message: String,
    },

    /// The engine failed to return a collection.
    #[error("failed to list {kind}s: {message}")]
    ListFailed {
        /// The kind of resource being listed.
        kind: ResourceKind,
        /// A short description of the failure.
        message: String,
    },

    /// An engine call did not complete before the request deadline.
    #[error("{operation} timed out after {seconds} seconds")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The deadline in seconds.
        seconds: u64,
    },

    /// Failed to create a tokio runtime for synchronous engine operations.
    #[error("failed to create async runtime: {message}")]
    RuntimeCreationFailed {
        /// A description of the runtime creation failure.
        message: String,
    },

    /// Health check failed - engine did not respond correctly.
    #[error("container engine health check failed: {message}")]
    HealthCheckFailed {
        /// A description of the health check failure.
        message: String,
    },

    /// Health check timed out.
    #[error("container engine health check timed out after {seconds} seconds")]
    HealthCheckTimeout {
        /// The timeout duration in seconds.
        seconds: u64,
    },
}

/// Errors that can occur while running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind {address}: {message}")]
    BindFailed {
        /// The address that could not be bound.
        address: String,
        /// A description of the bind failure.
        message: String,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {message}")]
    ServeFailed {
        /// A description of the failure.
        message: String,
    },
}

/// Top-level error type for the dockhand application.
///
/// This enum aggregates all domain-specific errors into a single type that can
/// be used throughout the application. At the application boundary (main.rs),
/// these errors are converted to `eyre::Report` for human-readable error
/// reporting; at the HTTP boundary they are mapped to status codes through
/// [`DockhandError::class`].
#[derive(Debug, Error)]
pub enum DockhandError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request was rejected before reaching the engine.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// An error occurred while talking to the container engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An error occurred in the HTTP server.
    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Classification of failures as seen by a client of the façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or missing input; the engine was never contacted.
    Validation,
    /// The identifier does not resolve on the engine.
    NotFound,
    /// The resource is in a state that forbids the operation.
    Precondition,
    /// The engine was unreachable or failed unexpectedly.
    Transport,
}

impl DockhandError {
    /// Classify this error into the client-facing taxonomy.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Request(_) => ErrorClass::Validation,
            Self::Engine(EngineError::NotFound { .. }) => ErrorClass::NotFound,
            Self::Engine(EngineError::ContainerRunning { .. }) => ErrorClass::Precondition,
            Self::Engine(_) | Self::Config(_) | Self::Server(_) => ErrorClass::Transport,
        }
    }
}

/// A specialised `Result` type for dockhand operations.
pub type Result<T> = std::result::Result<T, DockhandError>;
