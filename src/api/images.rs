//! Image resource handlers.

use bollard::models::ImageInspect;

use super::{
    Api, BulkResponse, Listing, MessageResponse, PullRequest, parse_body, require, require_id,
};
use crate::engine::{DanglingImageView, EngineFactory, ImageView, bulk, images};
use crate::error::Result;

impl<F: EngineFactory> Api<F> {
    /// List top-level images.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the list cannot be fetched.
    pub async fn list_images(&self) -> Result<Vec<ImageView>> {
        let client = self.factory.connect()?;
        self.within("list images", images::list(&client)).await
    }

    /// List dangling images, or a notice when there are none.
    ///
    /// # Errors
    ///
    /// Returns an engine error if the list cannot be fetched.
    pub async fn list_dangling_images(&self) -> Result<Listing<DanglingImageView>> {
        let client = self.factory.connect()?;
        let dangling = self
            .within("list dangling images", images::list_dangling(&client))
            .await?;
        Ok(Listing::or_notice(dangling, "No Dangling images"))
    }

    /// Inspect the image named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn inspect_image(&self, body: &[u8]) -> Result<ImageInspect> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        self.within("inspect image", images::inspect(&client, &id))
            .await
    }

    /// Pull the image named by `{"image": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn pull_image(&self, body: &[u8]) -> Result<MessageResponse> {
        let reference = require("image", parse_body::<PullRequest>(body)?.image)?;
        let client = self.factory.connect()?;
        let message = self
            .within("pull image", images::pull(&client, &reference))
            .await?;
        Ok(MessageResponse::new(message))
    }

    /// Force-remove the image named by `{"id": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a request error for a malformed body, otherwise an engine
    /// error.
    pub async fn remove_image(&self, body: &[u8]) -> Result<MessageResponse> {
        let id = require_id(body)?;
        let client = self.factory.connect()?;
        let message = self
            .within("remove image", images::remove(&client, &id))
            .await?;
        Ok(MessageResponse::new(message))
    }

    /// Force-remove every image.
    ///
    /// # Errors
    ///
    /// Returns an engine error only if the image list cannot be fetched.
    pub async fn remove_all_images(&self) -> Result<BulkResponse> {
        let client = self.factory.connect()?;
        let report = self
            .within("remove all images", bulk::remove_all_images(&client))
            .await?;
        Ok(BulkResponse::from_report("Images Deleted", &report))
    }

    /// Force-remove every dangling image.
    ///
    /// # Errors
    ///
    /// Returns an engine error only if the image list cannot be fetched.
    pub async fn remove_dangling_images(&self) -> Result<BulkResponse> {
        let client = self.factory.connect()?;
        let report = self
            .within("remove dangling images", bulk::remove_dangling_images(&client))
            .await?;
        Ok(BulkResponse::from_report("Dangling Images Deleted", &report))
    }
}
