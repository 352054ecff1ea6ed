//! Shared mock of the engine seam for adapter unit tests.

use bollard::models::{ContainerInspectResponse, ContainerState, ImageInspect, Volume};
use mockall::mock;

use super::client::{EngineClient, EngineFuture};
use super::records::{
    ContainerRecord, ImageRecord, LogOptions, NetworkRecord, StatsSample, VolumeRecord,
};

mock! {
    #[derive(Debug)]
    pub Engine {}

    impl EngineClient for Engine {
        fn ping<'a>(&'a self) -> EngineFuture<'a, ()>;
        fn list_containers<'a>(&'a self, all: bool) -> EngineFuture<'a, Vec<ContainerRecord>>;
        fn inspect_container<'a>(&'a self, id: &str) -> EngineFuture<'a, ContainerInspectResponse>;
        fn start_container<'a>(&'a self, id: &str) -> EngineFuture<'a, ()>;
        fn stop_container<'a>(&'a self, id: &str) -> EngineFuture<'a, ()>;
        fn remove_container<'a>(&'a self, id: &str, force: bool) -> EngineFuture<'a, ()>;
        fn container_stats<'a>(&'a self, id: &str) -> EngineFuture<'a, StatsSample>;
        fn container_logs<'a>(&'a self, id: &str, options: LogOptions) -> EngineFuture<'a, Vec<u8>>;
        fn list_images<'a>(&'a self, all: bool) -> EngineFuture<'a, Vec<ImageRecord>>;
        fn inspect_image<'a>(&'a self, id: &str) -> EngineFuture<'a, ImageInspect>;
        fn remove_image<'a>(&'a self, id: &str, force: bool) -> EngineFuture<'a, ()>;
        fn pull_image<'a>(&'a self, reference: &str) -> EngineFuture<'a, ()>;
        fn list_networks<'a>(&'a self) -> EngineFuture<'a, Vec<NetworkRecord>>;
        fn inspect_network<'a>(&'a self, id: &str) -> EngineFuture<'a, NetworkRecord>;
        fn remove_network<'a>(&'a self, id: &str) -> EngineFuture<'a, ()>;
        fn list_volumes<'a>(&'a self) -> EngineFuture<'a, Vec<VolumeRecord>>;
        fn inspect_volume<'a>(&'a self, name: &str) -> EngineFuture<'a, Volume>;
        fn remove_volume<'a>(&'a self, name: &str, force: bool) -> EngineFuture<'a, ()>;
    }
}

/// Engine response error with the given status code.
pub fn engine_error(status_code: u16, message: &str) -> bollard::errors::Error {
    bollard::errors::Error::DockerResponseServerError {
        status_code,
        message: String::from(message),
    }
}

/// Inspect response for a container in the given state.
pub fn inspect_response(running: bool, exit_code: i64) -> ContainerInspectResponse {
    ContainerInspectResponse {
        state: Some(ContainerState {
            running: Some(running),
            exit_code: Some(exit_code),
            ..ContainerState::default()
        }),
        ..ContainerInspectResponse::default()
    }
}

/// Container list entry with the given id and state.
pub fn container(id: &str, state: &str) -> ContainerRecord {
    ContainerRecord {
        id: String::from(id),
        image: String::from("alpine:3.20"),
        status: String::from(if state == "running" {
            "Up 5 minutes"
        } else {
            "Exited (0) 1 hour ago"
        }),
        state: String::from(state),
        mounts: Vec::new(),
    }
}

/// Image list entry with the given id and tags.
pub fn image(id: &str, repo_tags: &[&str]) -> ImageRecord {
    ImageRecord {
        id: String::from(id),
        repo_tags: repo_tags.iter().map(|tag| String::from(*tag)).collect(),
        created: 1_700_000_000,
        size: 2_097_152,
    }
}

/// Runtime for driving adapter futures in synchronous tests.
pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("test runtime should be created")
}
