//! Mapping of engine call failures onto [`EngineError`].

use crate::error::{EngineError, ResourceKind};

/// Short, client-safe description of an engine failure.
///
/// Engine response errors carry the daemon's own message; everything else
/// falls back to the transport error's display text.
pub(crate) fn short_message(error: &bollard::errors::Error) -> String {
    match error {
        bollard::errors::Error::DockerResponseServerError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Returns the engine response status code, if the failure carried one.
pub(crate) const fn status_code(error: &bollard::errors::Error) -> Option<u16> {
    match error {
        bollard::errors::Error::DockerResponseServerError { status_code, .. } => Some(*status_code),
        _ => None,
    }
}

/// Whether the engine refused the call because the resource is in use.
pub(crate) const fn is_conflict(error: &bollard::errors::Error) -> bool {
    matches!(status_code(error), Some(409))
}

/// Classify a failed call against a single resource.
pub(crate) fn resource_failure(
    operation: &str,
    kind: ResourceKind,
    id: &str,
    error: &bollard::errors::Error,
) -> EngineError {
    if status_code(error) == Some(404) {
        return EngineError::NotFound {
            operation: operation.to_owned(),
            kind,
            id: id.to_owned(),
        };
    }

    EngineError::OperationFailed {
        operation: operation.to_owned(),
        id: id.to_owned(),
        message: short_message(error),
    }
}

/// Classify a failed collection fetch.
pub(crate) fn list_failure(kind: ResourceKind, error: &bollard::errors::Error) -> EngineError {
    EngineError::ListFailed {
        kind,
        message: short_message(error),
    }
}
