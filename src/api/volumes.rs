//! Volume resource handlers.

use bollard::models::Volume;

use super::{Api, Listing, MessageResponse, VolumeContainersResponse, require_name};
use crate::engine::{EngineFactory, VolumeView, containers, volumes};
use crate::error::Result;

impl<F: EngineFactory> Api<F> {
    /// List volumes, or a notice when there are none.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the list cannot be fetched.
    pub async fn list_volumes(&self) -> Result<Listing<VolumeView>> {
        let client = self.factory.connect()?;
        let views = self.within("list volumes", volumes::list(&client)).await?;
        Ok(Listing::or_notice(views, "No Volumes are present"))
    }

    /// Inspect the volume named by `{"name": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn inspect_volume(&self, body: &[u8]) -> Result<Volume> {
        let name = require_name(body)?;
        let client = self.factory.connect()?;
        self.within("inspect volume", volumes::inspect(&client, &name))
            .await
    }

    /// Containers mounting the volume named by `{"name": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error, including not-found when no container mounts the volume.
    pub async fn volume_containers(&self, body: &[u8]) -> Result<VolumeContainersResponse> {
        let name = require_name(body)?;
        let client = self.factory.connect()?;
        let container_ids = self
            .within(
                "list volume containers",
                containers::attached_to_volume(&client, &name),
            )
            .await?;
        Ok(VolumeContainersResponse {
            message: String::from("Containers attached to the volume:"),
            container_ids,
        })
    }

    /// Remove the volume named by `{"name": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn remove_volume(&self, body: &[u8]) -> Result<MessageResponse> {
        let name = require_name(body)?;
        let client = self.factory.connect()?;
        let message = self
            .within("remove volume", volumes::remove(&client, &name))
            .await?;
        Ok(MessageResponse::new(message))
    }
}
