//! Classification of engine connection failures.
//!
//! Low-level `bollard` errors are converted into semantic [`EngineError`]
//! variants so a misconfigured socket produces an actionable message.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::EngineError;

/// Extract the filesystem path from a `unix://` or `npipe://` socket URI.
pub(super) fn extract_socket_path(socket_uri: &str) -> Option<&Path> {
    socket_uri
        .strip_prefix("unix://")
        .or_else(|| socket_uri.strip_prefix("npipe://"))
        .map(Path::new)
}

fn classify_io_error_kind(
    kind: ErrorKind,
    socket_path: Option<&Path>,
    message: &str,
) -> EngineError {
    match (kind, socket_path) {
        (ErrorKind::PermissionDenied, Some(path)) => EngineError::PermissionDenied {
            path: path.to_path_buf(),
        },
        (ErrorKind::NotFound, Some(path)) => EngineError::SocketNotFound {
            path: path.to_path_buf(),
        },
        _ => EngineError::ConnectionFailed {
            message: message.to_owned(),
        },
    }
}

/// Classify a `bollard` connection error for the given socket.
///
/// Falls back to `ConnectionFailed` when the error carries no recognisable
/// I/O cause or the endpoint has no filesystem path.
pub(super) fn classify_connection_error(
    bollard_error: &bollard::errors::Error,
    socket_uri: &str,
) -> EngineError {
    let socket_path = extract_socket_path(socket_uri);
    let message = bollard_error.to_string();

    match bollard_error {
        bollard::errors::Error::SocketNotFoundError(_) => {
            if let Some(path) = socket_path {
                return EngineError::SocketNotFound {
                    path: path.to_path_buf(),
                };
            }
        }
        bollard::errors::Error::IOError { err } => {
            let kind = io_error_kind_in_chain(err).unwrap_or_else(|| err.kind());
            return classify_io_error_kind(kind, socket_path, &message);
        }
        _ => {}
    }

    io_error_kind_in_chain(bollard_error).map_or(
        EngineError::ConnectionFailed {
            message: message.clone(),
        },
        |kind| classify_io_error_kind(kind, socket_path, &message),
    )
}

/// Walk the error source chain looking for an `io::Error` kind.
fn io_error_kind_in_chain(error: &dyn std::error::Error) -> Option<ErrorKind> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = error.source();
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            return Some(io_err.kind());
        }
        current = err.source();
    }
    None
}
