//! The transport seam between adapter operations and the container engine.
//!
//! [`EngineClient`] lists the engine calls the adapter needs. It is
//! implemented for [`bollard::Docker`] by delegating to the inherent methods,
//! and mocked in tests so the adapter logic runs without a daemon.

use std::future::Future;
use std::pin::Pin;

use bollard::Docker;
use bollard::models::{ContainerInspectResponse, ImageInspect, Volume};
use bollard::query_parameters::{
    CreateImageOptionsBuilder, InspectContainerOptions, InspectNetworkOptions,
    ListContainersOptionsBuilder, ListImagesOptionsBuilder, ListNetworksOptions,
    ListVolumesOptions, LogsOptionsBuilder, RemoveContainerOptionsBuilder,
    RemoveImageOptionsBuilder, RemoveVolumeOptionsBuilder, StartContainerOptions,
    StatsOptionsBuilder, StopContainerOptions,
};
use futures_util::{StreamExt, TryStreamExt};

use super::EngineConnector;
use super::records::{
    ContainerRecord, ImageRecord, LogOptions, NetworkRecord, StatsSample, VolumeRecord,
};
use crate::error::DockhandError;

/// Boxed future type returned by [`EngineClient`] implementors.
pub type EngineFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, bollard::errors::Error>> + Send + 'a>>;

/// Engine calls used by the adapter operations.
pub trait EngineClient: Send + Sync {
    /// Check that the engine answers.
    fn ping(&self) -> EngineFuture<'_, ()>;

    /// List containers; `all` includes stopped ones.
    fn list_containers(&self, all: bool) -> EngineFuture<'_, Vec<ContainerRecord>>;

    /// Inspect a single container.
    fn inspect_container(&self, id: &str) -> EngineFuture<'_, ContainerInspectResponse>;

    /// Start a container.
    fn start_container(&self, id: &str) -> EngineFuture<'_, ()>;

    /// Stop a container with the engine's default grace period.
    fn stop_container(&self, id: &str) -> EngineFuture<'_, ()>;

    /// Remove a container.
    fn remove_container(&self, id: &str, force: bool) -> EngineFuture<'_, ()>;

    /// Take one non-streaming resource-usage sample.
    fn container_stats(&self, id: &str) -> EngineFuture<'_, StatsSample>;

    /// Collect the full, non-following log of a container.
    fn container_logs(&self, id: &str, options: LogOptions) -> EngineFuture<'_, Vec<u8>>;

    /// List images; `all` includes intermediate layers.
    fn list_images(&self, all: bool) -> EngineFuture<'_, Vec<ImageRecord>>;

    /// Inspect a single image.
    fn inspect_image(&self, id: &str) -> EngineFuture<'_, ImageInspect>;

    /// Remove an image.
    fn remove_image(&self, id: &str, force: bool) -> EngineFuture<'_, ()>;

    /// Pull an image reference from its registry.
    fn pull_image(&self, reference: &str) -> EngineFuture<'_, ()>;

    /// List networks. Attached containers are not populated.
    fn list_networks(&self) -> EngineFuture<'_, Vec<NetworkRecord>>;

    /// Inspect a single network, including attached containers.
    fn inspect_network(&self, id: &str) -> EngineFuture<'_, NetworkRecord>;

    /// Remove a network.
    fn remove_network(&self, id: &str) -> EngineFuture<'_, ()>;

    /// List volumes.
    fn list_volumes(&self) -> EngineFuture<'_, Vec<VolumeRecord>>;

    /// Inspect a single volume.
    fn inspect_volume(&self, name: &str) -> EngineFuture<'_, Volume>;

    /// Remove a volume.
    fn remove_volume(&self, name: &str, force: bool) -> EngineFuture<'_, ()>;
}

impl EngineClient for Docker {
    fn ping(&self) -> EngineFuture<'_, ()> {
        Box::pin(async move { Self::ping(self).await.map(|_| ()) })
    }

    fn list_containers(&self, all: bool) -> EngineFuture<'_, Vec<ContainerRecord>> {
        Box::pin(async move {
            let options = ListContainersOptionsBuilder::default().all(all).build();
            let summaries = Self::list_containers(self, Some(options)).await?;
            Ok(summaries
                .into_iter()
                .map(|summary| ContainerRecord {
                    id: summary.id.unwrap_or_default(),
                    image: summary.image.unwrap_or_default(),
                    status: summary.status.unwrap_or_default(),
                    state: summary
                        .state
                        .map(|state| state.to_string())
                        .unwrap_or_default(),
                    mounts: summary
                        .mounts
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|mount| mount.name)
                        .collect(),
                })
                .collect())
        })
    }

    fn inspect_container(&self, id: &str) -> EngineFuture<'_, ContainerInspectResponse> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            Self::inspect_container(self, &owned_id, None::<InspectContainerOptions>).await
        })
    }

    fn start_container(&self, id: &str) -> EngineFuture<'_, ()> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            Self::start_container(self, &owned_id, None::<StartContainerOptions>).await
        })
    }

    fn stop_container(&self, id: &str) -> EngineFuture<'_, ()> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            Self::stop_container(self, &owned_id, None::<StopContainerOptions>).await
        })
    }

    fn remove_container(&self, id: &str, force: bool) -> EngineFuture<'_, ()> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            let options = RemoveContainerOptionsBuilder::default().force(force).build();
            Self::remove_container(self, &owned_id, Some(options)).await
        })
    }

    fn container_stats(&self, id: &str) -> EngineFuture<'_, StatsSample> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            let options = StatsOptionsBuilder::default().stream(false).build();
            let mut stream = Box::pin(Self::stats(self, &owned_id, Some(options)));
            let stats = stream.next().await.ok_or_else(|| {
                bollard::errors::Error::DockerResponseServerError {
                    status_code: 500,
                    message: String::from("engine returned no stats sample"),
                }
            })??;

            let cpu = stats.cpu_stats.unwrap_or_default();
            let precpu = stats.precpu_stats.unwrap_or_default();
            let memory = stats.memory_stats.unwrap_or_default();
            Ok(StatsSample {
                cpu_total: cpu
                    .cpu_usage
                    .as_ref()
                    .and_then(|usage| usage.total_usage)
                    .unwrap_or_default(),
                precpu_total: precpu
                    .cpu_usage
                    .as_ref()
                    .and_then(|usage| usage.total_usage)
                    .unwrap_or_default(),
                system: cpu.system_cpu_usage.unwrap_or_default(),
                presystem: precpu.system_cpu_usage.unwrap_or_default(),
                online_cpus: u32::try_from(cpu.online_cpus.unwrap_or_default())
                    .unwrap_or(u32::MAX),
                memory_usage: memory.usage.unwrap_or_default(),
                memory_limit: memory.limit.unwrap_or_default(),
            })
        })
    }

    fn container_logs(&self, id: &str, options: LogOptions) -> EngineFuture<'_, Vec<u8>> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            let logs_options = LogsOptionsBuilder::default()
                .stdout(options.stdout)
                .stderr(options.stderr)
                .tail("all")
                .build();
            let mut stream = Box::pin(Self::logs(self, &owned_id, Some(logs_options)));
            let mut output = Vec::new();
            while let Some(chunk) = stream.next().await {
                output.extend_from_slice(&chunk?.into_bytes());
            }
            Ok(output)
        })
    }

    fn list_images(&self, all: bool) -> EngineFuture<'_, Vec<ImageRecord>> {
        Box::pin(async move {
            let options = ListImagesOptionsBuilder::default().all(all).build();
            let summaries = Self::list_images(self, Some(options)).await?;
            Ok(summaries
                .into_iter()
                .map(|summary| ImageRecord {
                    id: summary.id,
                    repo_tags: summary.repo_tags,
                    created: summary.created,
                    size: summary.size,
                })
                .collect())
        })
    }

    fn inspect_image(&self, id: &str) -> EngineFuture<'_, ImageInspect> {
        let owned_id = id.to_owned();
        Box::pin(async move { Self::inspect_image(self, &owned_id).await })
    }

    fn remove_image(&self, id: &str, force: bool) -> EngineFuture<'_, ()> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            let options = RemoveImageOptionsBuilder::default().force(force).build();
            Self::remove_image(self, &owned_id, Some(options), None)
                .await
                .map(|_| ())
        })
    }

    fn pull_image(&self, reference: &str) -> EngineFuture<'_, ()> {
        let owned_reference = reference.to_owned();
        Box::pin(async move {
            let options = CreateImageOptionsBuilder::default()
                .from_image(&owned_reference)
                .build();
            Self::create_image(self, Some(options), None, None)
                .try_collect::<Vec<_>>()
                .await
                .map(|_| ())
        })
    }

    fn list_networks(&self) -> EngineFuture<'_, Vec<NetworkRecord>> {
        Box::pin(async move {
            let networks = Self::list_networks(self, None::<ListNetworksOptions>).await?;
            Ok(networks
                .into_iter()
                .map(|network| NetworkRecord {
                    id: network.id.unwrap_or_default(),
                    name: network.name.unwrap_or_default(),
                    driver: network.driver.unwrap_or_default(),
                    scope: network.scope.unwrap_or_default(),
                    containers: Default::default(),
                })
                .collect())
        })
    }

    fn inspect_network(&self, id: &str) -> EngineFuture<'_, NetworkRecord> {
        let owned_id = id.to_owned();
        Box::pin(async move {
            let network =
                Self::inspect_network(self, &owned_id, None::<InspectNetworkOptions>).await?;
            Ok(NetworkRecord {
                id: network.id.unwrap_or_default(),
                name: network.name.unwrap_or_default(),
                driver: network.driver.unwrap_or_default(),
                scope: network.scope.unwrap_or_default(),
                containers: network
                    .containers
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(container_id, container)| {
                        (container_id, container.name.unwrap_or_default())
                    })
                    .collect(),
            })
        })
    }

    fn remove_network(&self, id: &str) -> EngineFuture<'_, ()> {
        let owned_id = id.to_owned();
        Box::pin(async move { Self::remove_network(self, &owned_id).await })
    }

    fn list_volumes(&self) -> EngineFuture<'_, Vec<VolumeRecord>> {
        Box::pin(async move {
            let response = Self::list_volumes(self, None::<ListVolumesOptions>).await?;
            Ok(response
                .volumes
                .unwrap_or_default()
                .into_iter()
                .map(|volume| VolumeRecord {
                    name: volume.name,
                    driver: volume.driver,
                    mountpoint: volume.mountpoint,
                })
                .collect())
        })
    }

    fn inspect_volume(&self, name: &str) -> EngineFuture<'_, Volume> {
        let owned_name = name.to_owned();
        Box::pin(async move { Self::inspect_volume(self, &owned_name).await })
    }

    fn remove_volume(&self, name: &str, force: bool) -> EngineFuture<'_, ()> {
        let owned_name = name.to_owned();
        Box::pin(async move {
            let options = RemoveVolumeOptionsBuilder::default().force(force).build();
            Self::remove_volume(self, &owned_name, Some(options)).await
        })
    }
}

/// Opens an engine client for one request.
pub trait EngineFactory: Send + Sync + 'static {
    /// The client type this factory opens.
    type Client: EngineClient + 'static;

    /// Open a client.
    ///
    /// # Errors
    ///
    /// Returns an engine connection error if no client can be created.
    fn connect(&self) -> Result<Self::Client, DockhandError>;
}

/// Opens a `bollard` client against a fixed, already-resolved socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketEngineFactory {
    socket: String,
}

impl SocketEngineFactory {
    /// Create a factory for the given endpoint.
    #[must_use]
    pub fn new(socket: impl Into<String>) -> Self {
        Self {
            socket: socket.into(),
        }
    }

    /// The endpoint clients are opened against.
    #[must_use]
    pub fn socket(&self) -> &str {
        &self.socket
    }
}

impl EngineFactory for SocketEngineFactory {
    type Client = Docker;

    fn connect(&self) -> Result<Docker, DockhandError> {
        EngineConnector::connect(&self.socket)
    }
}
