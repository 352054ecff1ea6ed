//! In-memory container engine for integration tests.
//!
//! `FakeEngine` implements the public `EngineClient` seam over shared state so
//! a test can arrange containers, images, networks and volumes, drive the
//! façade, then inspect what is left.

#![allow(
    clippy::allow_attributes,
    dead_code,
    reason = "each test crate uses a different subset of the fake"
)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bollard::models::{ContainerInspectResponse, ContainerState, ImageInspect, Volume};
use dockhand::api::Api;
use dockhand::engine::{
    ContainerRecord, EngineClient, EngineFactory, EngineFuture, ImageRecord, LogOptions,
    NetworkRecord, StatsSample, VolumeRecord,
};
use dockhand::error::{EngineError, Result as DockhandResult};

/// A container and how it reacts to being started.
#[derive(Debug, Clone)]
pub struct FakeContainer {
    /// List entry as the engine reports it.
    pub record: ContainerRecord,
    /// Last exit code.
    pub exit_code: i64,
    /// Exit code the container dies with right after a start, if any.
    pub exits_on_start: Option<i64>,
}

/// Everything the fake engine knows.
#[derive(Debug, Default)]
pub struct FakeState {
    /// Containers, running or not.
    pub containers: Vec<FakeContainer>,
    /// Local images.
    pub images: Vec<ImageRecord>,
    /// Image ids whose removal the engine refuses with a conflict.
    pub images_in_use: Vec<String>,
    /// Networks.
    pub networks: Vec<NetworkRecord>,
    /// Volumes.
    pub volumes: Vec<VolumeRecord>,
    /// References pulled so far.
    pub pulled: Vec<String>,
    /// Whether connecting should fail.
    pub unreachable: bool,
    /// Whether every call should hang.
    pub stalled: bool,
}

/// Shared handle on fake engine state.
#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    state: Arc<Mutex<FakeState>>,
}

fn engine_error(status_code: u16, message: String) -> bollard::errors::Error {
    bollard::errors::Error::DockerResponseServerError {
        status_code,
        message,
    }
}

fn no_such(kind: &str, id: &str) -> bollard::errors::Error {
    engine_error(404, format!("No such {kind}: {id}"))
}

fn exited_status(code: i64) -> String {
    format!("Exited ({code}) 2 seconds ago")
}

impl FakeEngine {
    /// Lock the state for arrangement or inspection.
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Add a running container.
    pub fn with_running(self, id: &str) -> Self {
        self.add_container(id, "running", "Up 3 minutes", None);
        self
    }

    /// Add a stopped container that exited with `code`.
    pub fn with_stopped(self, id: &str, code: i64) -> Self {
        self.add_container(id, "exited", &exited_status(code), None);
        self
    }

    /// Add a stopped container that exits with `code` whenever it is started.
    pub fn with_crashing(self, id: &str, code: i64) -> Self {
        self.add_container(id, "exited", &exited_status(0), Some(code));
        self
    }

    /// Add an image with the given tags.
    pub fn with_image(self, id: &str, repo_tags: &[&str]) -> Self {
        self.state().images.push(ImageRecord {
            id: String::from(id),
            repo_tags: repo_tags.iter().map(|tag| String::from(*tag)).collect(),
            created: 1_700_000_000,
            size: 5_242_880,
        });
        self
    }

    /// Mark an image as used by a container.
    pub fn with_image_in_use(self, id: &str) -> Self {
        self.state().images_in_use.push(String::from(id));
        self
    }

    /// Add a network with attached `(container id, name)` pairs.
    pub fn with_network(self, id: &str, name: &str, attached: &[(&str, &str)]) -> Self {
        self.state().networks.push(NetworkRecord {
            id: String::from(id),
            name: String::from(name),
            driver: String::from("bridge"),
            scope: String::from("local"),
            containers: attached
                .iter()
                .map(|(cid, cname)| (String::from(*cid), String::from(*cname)))
                .collect(),
        });
        self
    }

    /// Add a volume.
    pub fn with_volume(self, name: &str) -> Self {
        self.state().volumes.push(VolumeRecord {
            name: String::from(name),
            driver: String::from("local"),
            mountpoint: format!("/var/lib/docker/volumes/{name}/_data"),
        });
        self
    }

    /// Mount `volume` into container `id`.
    pub fn mounting(self, id: &str, volume: &str) -> Self {
        if let Some(found) = self
            .state()
            .containers
            .iter_mut()
            .find(|c| c.record.id == id)
        {
            found.record.mounts.push(String::from(volume));
        }
        self
    }

    fn add_container(&self, id: &str, state: &str, status: &str, exits_on_start: Option<i64>) {
        self.state().containers.push(FakeContainer {
            record: ContainerRecord {
                id: String::from(id),
                image: String::from("nginx:1.27"),
                status: String::from(status),
                state: String::from(state),
                mounts: Vec::new(),
            },
            exit_code: 0,
            exits_on_start,
        });
    }

    /// Ids of containers still present.
    pub fn container_ids(&self) -> Vec<String> {
        self.state()
            .containers
            .iter()
            .map(|c| c.record.id.clone())
            .collect()
    }

    /// Ids of images still present.
    pub fn image_ids(&self) -> Vec<String> {
        self.state().images.iter().map(|i| i.id.clone()).collect()
    }

    fn reply<'a, T: Send + 'a>(
        &self,
        outcome: Result<T, bollard::errors::Error>,
    ) -> EngineFuture<'a, T> {
        let stalled = self.state().stalled;
        Box::pin(async move {
            if stalled {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            outcome
        })
    }

    fn with_container<T>(
        &self,
        id: &str,
        apply: impl FnOnce(&mut FakeContainer) -> Result<T, bollard::errors::Error>,
    ) -> Result<T, bollard::errors::Error> {
        let mut state = self.state();
        let found = state
            .containers
            .iter_mut()
            .find(|c| c.record.id == id)
            .ok_or_else(|| no_such("container", id))?;
        apply(found)
    }
}

impl EngineClient for FakeEngine {
    fn ping(&self) -> EngineFuture<'_, ()> {
        self.reply(Ok(()))
    }

    fn list_containers(&self, all: bool) -> EngineFuture<'_, Vec<ContainerRecord>> {
        let listed: Vec<ContainerRecord> = self
            .state()
            .containers
            .iter()
            .filter(|c| all || c.record.state == "running")
            .map(|c| c.record.clone())
            .collect();
        self.reply(Ok(listed))
    }

    fn inspect_container(&self, id: &str) -> EngineFuture<'_, ContainerInspectResponse> {
        let outcome = self.with_container(id, |c| {
            Ok(ContainerInspectResponse {
                id: Some(c.record.id.clone()),
                state: Some(ContainerState {
                    running: Some(c.record.state == "running"),
                    exit_code: Some(c.exit_code),
                    ..ContainerState::default()
                }),
                ..ContainerInspectResponse::default()
            })
        });
        self.reply(outcome)
    }

    fn start_container(&self, id: &str) -> EngineFuture<'_, ()> {
        let outcome = self.with_container(id, |c| {
            if let Some(code) = c.exits_on_start {
                c.exit_code = code;
                c.record.status = exited_status(code);
            } else {
                c.record.state = String::from("running");
                c.record.status = String::from("Up 1 second");
            }
            Ok(())
        });
        self.reply(outcome)
    }

    fn stop_container(&self, id: &str) -> EngineFuture<'_, ()> {
        let outcome = self.with_container(id, |c| {
            c.record.state = String::from("exited");
            c.record.status = exited_status(0);
            c.exit_code = 0;
            Ok(())
        });
        self.reply(outcome)
    }

    fn remove_container(&self, id: &str, force: bool) -> EngineFuture<'_, ()> {
        let outcome = {
            let mut state = self.state();
            match state.containers.iter().position(|c| c.record.id == id) {
                None => Err(no_such("container", id)),
                Some(index) => {
                    let running = state
                        .containers
                        .get(index)
                        .is_some_and(|c| c.record.state == "running");
                    if running && !force {
                        Err(engine_error(
                            409,
                            format!("cannot remove container {id}: container is running"),
                        ))
                    } else {
                        state.containers.remove(index);
                        Ok(())
                    }
                }
            }
        };
        self.reply(outcome)
    }

    fn container_stats(&self, id: &str) -> EngineFuture<'_, StatsSample> {
        let outcome = self.with_container(id, |_| {
            Ok(StatsSample {
                cpu_total: 400_000,
                precpu_total: 200_000,
                system: 20_000_000,
                presystem: 10_000_000,
                online_cpus: 2,
                memory_usage: 64 * 1024 * 1024,
                memory_limit: 256 * 1024 * 1024,
            })
        });
        self.reply(outcome)
    }

    fn container_logs(&self, id: &str, _options: LogOptions) -> EngineFuture<'_, Vec<u8>> {
        let outcome = self.with_container(id, |_| Ok(b"booting\nready\n".to_vec()));
        self.reply(outcome)
    }

    fn list_images(&self, _all: bool) -> EngineFuture<'_, Vec<ImageRecord>> {
        let listed = self.state().images.clone();
        self.reply(Ok(listed))
    }

    fn inspect_image(&self, id: &str) -> EngineFuture<'_, ImageInspect> {
        let outcome = self
            .state()
            .images
            .iter()
            .find(|i| i.id == id || i.repo_tags.iter().any(|tag| tag == id))
            .map(|i| ImageInspect {
                id: Some(i.id.clone()),
                repo_tags: Some(i.repo_tags.clone()),
                size: Some(i.size),
                ..ImageInspect::default()
            })
            .ok_or_else(|| no_such("image", id));
        self.reply(outcome)
    }

    fn remove_image(&self, id: &str, _force: bool) -> EngineFuture<'_, ()> {
        let outcome = {
            let mut state = self.state();
            if state.images_in_use.iter().any(|used| used == id) {
                Err(engine_error(
                    409,
                    format!("conflict: unable to delete {id} - image is being used"),
                ))
            } else if let Some(index) = state.images.iter().position(|i| i.id == id) {
                state.images.remove(index);
                Ok(())
            } else {
                Err(no_such("image", id))
            }
        };
        self.reply(outcome)
    }

    fn pull_image(&self, reference: &str) -> EngineFuture<'_, ()> {
        let outcome = if reference.starts_with("missing/") {
            Err(engine_error(
                404,
                format!("pull access denied for {reference}, repository does not exist"),
            ))
        } else {
            self.state().pulled.push(String::from(reference));
            Ok(())
        };
        self.reply(outcome)
    }

    fn list_networks(&self) -> EngineFuture<'_, Vec<NetworkRecord>> {
        let listed = self.state().networks.clone();
        self.reply(Ok(listed))
    }

    fn inspect_network(&self, id: &str) -> EngineFuture<'_, NetworkRecord> {
        let outcome = self
            .state()
            .networks
            .iter()
            .find(|n| n.id == id || n.name == id)
            .cloned()
            .ok_or_else(|| no_such("network", id));
        self.reply(outcome)
    }

    fn remove_network(&self, id: &str) -> EngineFuture<'_, ()> {
        let outcome = {
            let mut state = self.state();
            match state.networks.iter().position(|n| n.id == id || n.name == id) {
                Some(index) => {
                    state.networks.remove(index);
                    Ok(())
                }
                None => Err(no_such("network", id)),
            }
        };
        self.reply(outcome)
    }

    fn list_volumes(&self) -> EngineFuture<'_, Vec<VolumeRecord>> {
        let listed = self.state().volumes.clone();
        self.reply(Ok(listed))
    }

    fn inspect_volume(&self, name: &str) -> EngineFuture<'_, Volume> {
        let outcome = self
            .state()
            .volumes
            .iter()
            .find(|v| v.name == name)
            .map(|v| Volume {
                name: v.name.clone(),
                driver: v.driver.clone(),
                mountpoint: v.mountpoint.clone(),
                ..Volume::default()
            })
            .ok_or_else(|| no_such("volume", name));
        self.reply(outcome)
    }

    fn remove_volume(&self, name: &str, _force: bool) -> EngineFuture<'_, ()> {
        let outcome = {
            let mut state = self.state();
            match state.volumes.iter().position(|v| v.name == name) {
                Some(index) => {
                    state.volumes.remove(index);
                    Ok(())
                }
                None => Err(no_such("volume", name)),
            }
        };
        self.reply(outcome)
    }
}

/// Factory handing out clones of one shared fake engine.
#[derive(Debug, Clone)]
pub struct FakeFactory {
    engine: FakeEngine,
}

impl EngineFactory for FakeFactory {
    type Client = FakeEngine;

    fn connect(&self) -> DockhandResult<FakeEngine> {
        if self.engine.state().unreachable {
            return Err(EngineError::SocketNotFound {
                path: std::path::PathBuf::from("/var/run/docker.sock"),
            }
            .into());
        }
        Ok(self.engine.clone())
    }
}

/// Handlers bound to `engine` with the given per-call deadline.
pub fn api_for(engine: &FakeEngine, deadline: Duration) -> Api<FakeFactory> {
    Api::new(
        FakeFactory {
            engine: engine.clone(),
        },
        deadline,
    )
}
