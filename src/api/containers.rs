//! Container resource handlers.

use bollard::models::ContainerInspectResponse;

use super::{Api, BulkResponse, MessageResponse, require_id};
use crate::engine::{
    ContainerLogsView, ContainerStatsView, ContainerView, EngineFactory, bulk, containers,
};
use crate::error::Result;

impl<F: EngineFactory> Api<F> {
    /// List running containers.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the list cannot be fetched.
    pub async fn list_running_containers(&self) -> Result<Vec<ContainerView>> {
        let client = self.factory.connect()?;
        self.within("list containers", containers::list_running(&client))
            .await
    }

    /// List all containers.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the list cannot be fetched.
    pub async fn list_all_containers(&self) -> Result<Vec<ContainerView>> {
        let client = self.factory.connect()?;
        self.within("list all containers", containers::list_all(&client))
            .await
    }

    /// Start the container named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error from the start operation.
    pub async fn start_container(&self, body: &[u8]) -> Result<MessageResponse> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        let outcome = self
            .within("start container", containers::start(&client, &id))
            .await?;
        Ok(MessageResponse::new(outcome.to_string()))
    }

    /// Stop the container named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error from the stop operation.
    pub async fn stop_container(&self, body: &[u8]) -> Result<MessageResponse> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        let outcome = self
            .within("stop container", containers::stop(&client, &id))
            .await?;
        Ok(MessageResponse::new(outcome.to_string()))
    }

    /// Remove the stopped container named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, a precondition error for
    /// a running container, otherwise an engine error.
    pub async fn remove_container(&self, body: &[u8]) -> Result<MessageResponse> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        let outcome = self
            .within("remove container", containers::remove(&client, &id))
            .await?;
        Ok(MessageResponse::new(outcome.to_string()))
    }

    /// Remove every stopped container.
    ///
    /// # Errors
    ///
    /// Returns an engine error only if the container list cannot be fetched.
    pub async fn remove_all_containers(&self) -> Result<BulkResponse> {
        let client = self.factory.connect()?;
        let report = self
            .within("remove all containers", bulk::remove_all_containers(&client))
            .await?;
        Ok(BulkResponse::from_report("Containers Deleted", &report))
    }

    /// Inspect the container named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn inspect_container(&self, body: &[u8]) -> Result<ContainerInspectResponse> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        self.within("inspect container", containers::inspect(&client, &id))
            .await
    }

    /// Collect the log of the container named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn container_logs(&self, body: &[u8]) -> Result<ContainerLogsView> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        self.within("retrieve container logs", containers::logs(&client, &id))
            .await
    }

    /// Sample resource usage of the container named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn container_stats(&self, body: &[u8]) -> Result<ContainerStatsView> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        self.within("retrieve container stats", containers::stats(&client, &id))
            .await
    }
}
