//! Image operations.

use bollard::models::ImageInspect;
use tracing::debug;

use super::client::EngineClient;
use super::failure::{list_failure, resource_failure};
use super::records::ImageRecord;
use super::views::{DanglingImageView, ImageView};
use crate::error::{ResourceKind, Result};
use crate::format;

/// Fetch the top-level image list.
pub(crate) async fn fetch<C: EngineClient + ?Sized>(client: &C) -> Result<Vec<ImageRecord>> {
    client
        .list_images(false)
        .await
        .map_err(|error| list_failure(ResourceKind::Image, &error).into())
}

fn view(record: ImageRecord) -> ImageView {
    let (name, tag) = format::split_repo_tag(&record.repo_tags);
    ImageView {
        name,
        tag,
        created: format::format_timestamp(record.created),
        size: format::format_size_mb(record.size),
        id: record.id,
    }
}

fn dangling_view(record: ImageRecord) -> DanglingImageView {
    DanglingImageView {
        created: format::format_timestamp(record.created),
        size: format::format_size_mb(record.size),
        id: record.id,
    }
}

/// List top-level images with their first repo-tag split into name and tag.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the engine cannot list images.
pub async fn list<C: EngineClient + ?Sized>(client: &C) -> Result<Vec<ImageView>> {
    Ok(fetch(client).await?.into_iter().map(view).collect())
}

/// List images that carry no repository tag.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the engine cannot list images.
pub async fn list_dangling<C: EngineClient + ?Sized>(
    client: &C,
) -> Result<Vec<DanglingImageView>> {
    Ok(fetch(client)
        .await?
        .into_iter()
        .filter(|record| format::is_dangling(&record.repo_tags))
        .map(dangling_view)
        .collect())
}

/// Remove an image, forcing removal of its tags.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id, or
/// `EngineError::OperationFailed` if the engine refuses the removal.
pub async fn remove<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<String> {
    debug!(image = id, "removing image");
    client
        .remove_image(id, true)
        .await
        .map_err(|error| resource_failure("remove image", ResourceKind::Image, id, &error))?;
    Ok(String::from("Image removed successfully"))
}

/// Inspect an image.
///
/// # Errors
///
/// Returns `EngineError::NotFound` for an unknown id.
pub async fn inspect<C: EngineClient + ?Sized>(client: &C, id: &str) -> Result<ImageInspect> {
    client
        .inspect_image(id)
        .await
        .map_err(|error| resource_failure("inspect image", ResourceKind::Image, id, &error).into())
}

/// Pull an image reference such as `nginx:1.27`.
///
/// # Errors
///
/// Returns `EngineError::NotFound` if the registry does not know the
/// reference, or `EngineError::OperationFailed` if the pull fails.
pub async fn pull<C: EngineClient + ?Sized>(client: &C, reference: &str) -> Result<String> {
    debug!(image = reference, "pulling image");
    client
        .pull_image(reference)
        .await
        .map_err(|error| resource_failure("pull image", ResourceKind::Image, reference, &error))?;
    Ok(format!("Image pulled successfully: {reference}"))
}
