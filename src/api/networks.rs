//! Network resource handlers.

use super::{Api, Listing, MessageResponse, NetworkContainersResponse, require_id};
use crate::engine::{EngineFactory, NetworkView, networks};
use crate::error::Result;

impl<F: EngineFactory> Api<F> {
    /// List networks, or a notice when there are none.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the list cannot be fetched.
    pub async fn list_networks(&self) -> Result<Listing<NetworkView>> {
        let client = self.factory.connect()?;
        let views = self.within("list networks", networks::list(&client)).await?;
        Ok(Listing::or_notice(views, "No Networks are present"))
    }

    /// Inspect the network named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn inspect_network(&self, body: &[u8]) -> Result<NetworkView> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        self.within("inspect network", networks::inspect(&client, &id))
            .await
    }

    /// Containers attached to the network named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error, including not-found when nothing is attached.
    pub async fn network_containers(&self, body: &[u8]) -> Result<NetworkContainersResponse> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        let containers = self
            .within(
                "list network containers",
                networks::attached_containers(&client, &id),
            )
            .await?;
        Ok(NetworkContainersResponse {
            containers_attached_to_network: containers,
        })
    }

    /// Remove the network named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn remove_network(&self, body: &[u8]) -> Result<MessageResponse> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        let message = self
            .within("remove network", networks::remove(&client, &id))
            .await?;
        Ok(MessageResponse::new(message))
    }
}
