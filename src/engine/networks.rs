//! Network operations.

use tracing::debug;

use super::client::EngineClient;
use super::failure::{list_failure, resource_failure};
use super::records::NetworkRecord;
use super::views::{NetworkContainerView, NetworkView};
use crate::error::{EngineError, ResourceKind, Result};

fn view(record: NetworkRecord, with_containers: bool) -> NetworkView {
    NetworkView {
        id: record.id,
        name: record.name,
        driver: record.driver,
        scope: record.scope,
        containers: with_containers.then_some(record.containers),
    }
}

async fn inspect_record<C: EngineClient + ?Sized>(
    client: &C,
    operation: &str,
    id: &str,
) -> Result<NetworkRecord> {
    client
        .inspect_network(id)
        .await
        .map_err(|error| resource_failure(operation, ResourceKind::Network, id, &error).into())
}

/// List networks.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the engine cannot list networks.
pub async fn list<C: EngineClient + ?Sized>(client: &C) -> Result<Vec<NetworkView>> {
    let records = client
        .list_networks()
        .await
        .map_err(|error| list_failure(ResourceKind::Network, &error))?;
    Ok(records
        .into_iter()
        .map(|record| view(record, false))
        .collect())
}

/// Inspect a network, including its attached containers.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id.
pub async fn inspect<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<NetworkView> {
    Ok(view(inspect_record(client, "inspect network", id).await?, true))
}

/// Containers attached to a network.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id or a network with no
/// attached containers.
pub async fn attached_containers<C: EngineClient + ?Sized>(
    client: &C,
    id: &str,
) -> Result<Vec<NetworkContainerView>> {
    const OPERATION: &str = "find containers attached to network";

    let record = inspect_record(client, OPERATION, id).await?;
    if record.containers.is_empty() {
        return Err(EngineError::NotFound {
            operation: OPERATION.to_owned(),
            kind: ResourceKind::Network,
            id: id.to_owned(),
        }
        .into());
    }

    Ok(record
        .containers
        .into_iter()
        .map(|(container_id, name)| NetworkContainerView { container_id, name })
        .collect())
}

/// Remove a network.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id, or
/// `EngineError::OperationFailed` if the network is in use.
pub async fn remove<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<String> {
    debug!(network = id, "removing network");
    client
        .remove_network(id)
        .await
        .map_err(|error| resource_failure("remove network", ResourceKind::Network, id, &error))?;
    Ok(String::from("Network removed successfully"))
}
