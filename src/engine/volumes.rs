//! Volume operations.

use bollard::models::Volume;
use tracing::debug;

use super::client::EngineClient;
use super::failure::{list_failure, resource_failure};
use super::views::VolumeView;
use crate::error::{ResourceKind, Result};

/// List volumes.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the engine cannot list volumes.
pub async fn list<C: EngineClient + ?Sized>(client: &C) -> Result<Vec<VolumeView>> {
    let records = client
        .list_volumes()
        .await
        .map_err(|error| list_failure(ResourceKind::Volume, &error))?;
    Ok(records
        .into_iter()
        .map(|record| VolumeView {
            name: record.name,
            driver: record.driver,
            mountpoint: record.mountpoint,
        })
        .collect())
}

/// Inspect a volume.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown name.
pub async fn inspect<C: EngineClient + ?Sized>(client: &C, name: &str) -> Result<Volume> {
    client
        .inspect_volume(name)
        .await
        .map_err(|error| {
            resource_failure("inspect volume", ResourceKind::Volume, name, &error).into()
        })
}

/// Remove a volume that no container uses.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown name, or
/// `EngineError::OperationFailed` if the volume is in use.
pub async fn remove<C: EngineClient + ?Sized>(client: &C, name: &str) -> Result<String> {
    debug!(volume = name, "removing volume");
    client
        .remove_volume(name, false)
        .await
        .map_err(|error| resource_failure("remove volume", ResourceKind::Volume, name, &error))?;
    Ok(String::from("Volume removed successfully"))
}
