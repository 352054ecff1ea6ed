//! Container operations.
//!
//! State-changing operations inspect the container first and only issue the
//! engine call when the observed state allows it, so repeating a start or a
//! stop is a reported no-op rather than an engine error.

use std::fmt;

use bollard::models::ContainerInspectResponse;
use tracing::debug;

use super::client::EngineClient;
use super::failure::{list_failure, resource_failure};
use super::records::{ContainerRecord, LogOptions};
use super::views::{ContainerLogsView, ContainerStatsView, ContainerView};
use crate::error::{EngineError, ResourceKind, Result};
use crate::format;

/// Result of a start, stop or remove request that reached a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    /// Start was requested for a running container; nothing was done.
    AlreadyRunning,
    /// The container was started and is running.
    Started,
    /// The container was started but exited with a non-zero code.
    ExitedWithCode(i64),
    /// The container was started but exited with code zero.
    ExitedImmediately,
    /// Stop was requested for a stopped container; nothing was done.
    NotRunning,
    /// The container was stopped.
    Stopped,
    /// The container was removed.
    Removed,
}

impl fmt::Display for LifecycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => f.write_str("Container is already running"),
            Self::Started => f.write_str("Container started successfully"),
            Self::ExitedWithCode(code) => write!(
                f,
                "Failed to start the container, it exited with code {code}"
            ),
            Self::ExitedImmediately => {
                f.write_str("Failed to start the container, it exited immediately")
            }
            Self::NotRunning => f.write_str("Specified container is not running"),
            Self::Stopped => f.write_str("Container stopped successfully"),
            Self::Removed => f.write_str("Container removed successfully"),
        }
    }
}

/// Whether an inspect response reports the container as running.
pub(crate) fn is_running(inspect: &ContainerInspectResponse) -> bool {
    inspect
        .state
        .as_ref()
        .and_then(|state| state.running)
        .unwrap_or(false)
}

fn exit_code(inspect: &ContainerInspectResponse) -> i64 {
    inspect
        .state
        .as_ref()
        .and_then(|state| state.exit_code)
        .unwrap_or_default()
}

pub(crate) fn view(record: ContainerRecord) -> ContainerView {
    let exit_code = format::parse_exit_code(&record.status);
    ContainerView {
        running: record.state == "running",
        exit_code,
        id: record.id,
        image: record.image,
        status: record.status,
        state: record.state,
    }
}

async fn inspect_for<C: EngineClient + ?Sized>(
    client: &C,
    operation: &str,
    id: &str,
) -> Result<ContainerInspectResponse> {
    client
        .inspect_container(id)
        .await
        .map_err(|error| resource_failure(operation, ResourceKind::Container, id, &error).into())
}

async fn list<C: EngineClient + ?Sized>(client: &C, all: bool) -> Result<Vec<ContainerView>> {
    let records = client
        .list_containers(all)
        .await
        .map_err(|error| list_failure(ResourceKind::Container, &error))?;
    Ok(records.into_iter().map(view).collect())
}

/// List running containers.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the engine cannot list containers.
pub async fn list_running<C: EngineClient + ?Sized>(client: &C) -> Result<Vec<ContainerView>> {
    list(client, false).await
}

/// List all containers, including stopped ones.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the engine cannot list containers.
pub async fn list_all<C: EngineClient + ?Sized>(client: &C) -> Result<Vec<ContainerView>> {
    list(client, true).await
}

/// Start a container unless it is already running.
///
/// After starting, the container is inspected again so a container that
/// exits straight away is reported instead of claimed as started.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id, or
/// `EngineError::OperationFailed` if the engine rejects a call.
pub async fn start<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<LifecycleOutcome> {
    const OPERATION: &str = "start container";

    if is_running(&inspect_for(client, OPERATION, id).await?) {
        return Ok(LifecycleOutcome::AlreadyRunning);
    }

    debug!(container = id, "starting container");
    client
        .start_container(id)
        .await
        .map_err(|error| resource_failure(OPERATION, ResourceKind::Container, id, &error))?;

    let after = inspect_for(client, OPERATION, id).await?;
    let outcome = match (is_running(&after), exit_code(&after)) {
        (true, _) => LifecycleOutcome::Started,
        (false, 0) => LifecycleOutcome::ExitedImmediately,
        (false, code) => LifecycleOutcome::ExitedWithCode(code),
    };
    Ok(outcome)
}

/// Stop a container if it is running.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id, or
/// `EngineError::OperationFailed` if the engine rejects the stop.
pub async fn stop<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<LifecycleOutcome> {
    const OPERATION: &str = "stop container";

    if !is_running(&inspect_for(client, OPERATION, id).await?) {
        return Ok(LifecycleOutcome::NotRunning);
    }

    debug!(container = id, "stopping container");
    client
        .stop_container(id)
        .await
        .map_err(|error| resource_failure(OPERATION, ResourceKind::Container, id, &error))?;
    Ok(LifecycleOutcome::Stopped)
}

/// Remove a stopped container.
///
/// # Errors
///
/// Returns `EngineError::ContainerRunning` if the container is running,
/// `EngineError::NotFound` for an unknown id, or
/// `EngineError::OperationFailed` if the engine rejects the removal.
pub async fn remove<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<LifecycleOutcome> {
    const OPERATION: &str = "remove container";

    if is_running(&inspect_for(client, OPERATION, id).await?) {
        return Err(EngineError::ContainerRunning {
            operation: OPERATION.to_owned(),
            id: id.to_owned(),
        }
        .into());
    }

    debug!(container = id, "removing container");
    client
        .remove_container(id, false)
        .await
        .map_err(|error| resource_failure(OPERATION, ResourceKind::Container, id, &error))?;
    Ok(LifecycleOutcome::Removed)
}

/// Inspect a container.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id.
pub async fn inspect<C: EngineClient + ?Sized>(
    client: &C,
    id: &str,
) -> Result<ContainerInspectResponse> {
    inspect_for(client, "inspect container", id).await
}

/// Collect the combined stdout and stderr log of a container.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id, or
/// `EngineError::OperationFailed` if the log stream fails.
pub async fn logs<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<ContainerLogsView> {
    const OPERATION: &str = "retrieve logs for container";

    inspect_for(client, OPERATION, id).await?;
    let bytes = client
        .container_logs(id, LogOptions::default())
        .await
        .map_err(|error| resource_failure(OPERATION, ResourceKind::Container, id, &error))?;
    Ok(ContainerLogsView {
        id: id.to_owned(),
        logs: format::logs_to_text(&bytes),
    })
}

/// Take a resource-usage snapshot of a container.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id, or
/// `EngineError::OperationFailed` if no sample can be taken.
pub async fn stats<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<ContainerStatsView> {
    const OPERATION: &str = "retrieve stats for container";

    inspect_for(client, OPERATION, id).await?;
    let sample = client
        .container_stats(id)
        .await
        .map_err(|error| resource_failure(OPERATION, ResourceKind::Container, id, &error))?;
    Ok(ContainerStatsView {
        id: id.to_owned(),
        cpu_usage_percent: format::cpu_percent(&sample),
        memory_usage_percent: format::memory_percent(&sample),
    })
}

/// Ids of all containers, running or not, that mount the named volume.
///
/// # Errors
///
/// Returns `EngineError::NotFound` when no container mounts the volume, or
/// `EngineError::ListFailed` if the engine cannot list containers.
pub async fn attached_to_volume<C: EngineClient + ?Sized>(
    client: &C,
    volume: &str,
) -> Result<Vec<String>> {
    let records = client
        .list_containers(true)
        .await
        .map_err(|error| list_failure(ResourceKind::Container, &error))?;

    let ids: Vec<String> = records
        .into_iter()
        .filter(|record| record.mounts.iter().any(|mount| mount == volume))
        .map(|record| record.id)
        .collect();

    if ids.is_empty() {
        return Err(EngineError::NotFound {
            operation: String::from("find containers attached to volume"),
            kind: ResourceKind::Volume,
            id: volume.to_owned(),
        }
        .into());
    }
    Ok(ids)
}
