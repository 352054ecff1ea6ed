//! Bulk removal across whole collections.
//!
//! Each bulk operation fetches its collection once, then applies a
//! single-item removal to every member in collection order. Individual
//! failures are recorded as entries and never abort the run; only a failure
//! to fetch the collection fails the operation.

use serde::Serialize;
use tracing::{debug, info};

use super::client::EngineClient;
use super::containers::is_running;
use super::failure::{is_conflict, list_failure};
use super::images;
use crate::error::{ResourceKind, Result};
use crate::format;

/// What happened to one member of a bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOutcome {
    /// The item was removed.
    Removed,
    /// The item was left in place because its state forbids removal.
    Skipped,
    /// The engine failed to inspect or remove the item.
    Failed,
}

/// Outcome line for one member of a bulk run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntry {
    /// Identifier of the item.
    pub target: String,
    /// Machine-readable outcome.
    pub outcome: BulkOutcome,
    /// Human-readable outcome line, ending with the item id.
    pub message: String,
}

/// Per-outcome counts of a bulk run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    /// Items removed.
    pub removed: usize,
    /// Items skipped.
    pub skipped: usize,
    /// Items that failed.
    pub failed: usize,
}

/// Ordered outcome of a bulk run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    entries: Vec<BulkEntry>,
    notice: Option<String>,
}

impl BulkReport {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            notice: None,
        }
    }

    fn empty(notice: &str) -> Self {
        Self {
            entries: Vec::new(),
            notice: Some(notice.to_owned()),
        }
    }

    fn record(&mut self, target: &str, outcome: BulkOutcome, prefix: &str) {
        let message = format!("{prefix}: {target}");
        debug!(target_id = target, ?outcome, "{message}");
        self.entries.push(BulkEntry {
            target: target.to_owned(),
            outcome,
            message,
        });
    }

    /// Per-item entries, in collection order. Empty for an empty collection.
    #[must_use]
    pub fn entries(&self) -> &[BulkEntry] {
        &self.entries
    }

    /// Outcome lines: one per item, or the single informational line when
    /// the collection was empty.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.notice.as_ref().map_or_else(
            || self.entries.iter().map(|entry| entry.message.clone()).collect(),
            |notice| vec![notice.clone()],
        )
    }

    /// Counts of each outcome.
    #[must_use]
    pub fn summary(&self) -> BulkSummary {
        self.entries
            .iter()
            .fold(BulkSummary::default(), |mut summary, entry| {
                match entry.outcome {
                    BulkOutcome::Removed => summary.removed += 1,
                    BulkOutcome::Skipped => summary.skipped += 1,
                    BulkOutcome::Failed => summary.failed += 1,
                }
                summary
            })
    }

    fn log_summary(&self, operation: &str) {
        let summary = self.summary();
        info!(
            operation,
            removed = summary.removed,
            skipped = summary.skipped,
            failed = summary.failed,
            "bulk removal finished"
        );
    }
}

/// Remove every stopped container, skipping running ones.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the container list cannot be fetched.
pub async fn remove_all_containers<C: EngineClient + ?Sized>(client: &C) -> Result<BulkReport> {
    let records = client
        .list_containers(true)
        .await
        .map_err(|error| list_failure(ResourceKind::Container, &error))?;
    if records.is_empty() {
        return Ok(BulkReport::empty("No containers found"));
    }

    let mut report = BulkReport::with_capacity(records.len());
    for record in &records {
        let id = record.id.as_str();
        let Ok(inspect) = client.inspect_container(id).await else {
            report.record(id, BulkOutcome::Failed, "Failed to inspect container");
            continue;
        };
        if is_running(&inspect) {
            report.record(
                id,
                BulkOutcome::Skipped,
                "Cannot delete the container, it's in running state",
            );
            continue;
        }
        match client.remove_container(id, false).await {
            Ok(()) => report.record(id, BulkOutcome::Removed, "Container deleted"),
            Err(_) => report.record(id, BulkOutcome::Failed, "Failed to remove container"),
        }
    }

    report.log_summary("remove all containers");
    Ok(report)
}

async fn force_remove_each<C: EngineClient + ?Sized>(
    client: &C,
    ids: &[String],
    conflict_prefix: &str,
) -> BulkReport {
    let mut report = BulkReport::with_capacity(ids.len());
    for id in ids {
        match client.remove_image(id, true).await {
            Ok(()) => report.record(id, BulkOutcome::Removed, "Image deleted"),
            Err(error) if is_conflict(&error) => {
                report.record(id, BulkOutcome::Failed, conflict_prefix);
            }
            Err(_) => report.record(id, BulkOutcome::Failed, "Failed to remove image"),
        }
    }
    report
}

/// Force-remove every image, including intermediate layers.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the image list cannot be fetched.
pub async fn remove_all_images<C: EngineClient + ?Sized>(client: &C) -> Result<BulkReport> {
    let records = client
        .list_images(true)
        .await
        .map_err(|error| list_failure(ResourceKind::Image, &error))?;
    if records.is_empty() {
        return Ok(BulkReport::empty("No images found"));
    }

    let ids: Vec<String> = records.into_iter().map(|record| record.id).collect();
    let report = force_remove_each(client, &ids, "Cannot remove, image is being used").await;
    report.log_summary("remove all images");
    Ok(report)
}

/// Force-remove every image that carries no repository tag.
///
/// # Errors
///
/// Returns `EngineError::ListFailed` if the image list cannot be fetched.
pub async fn remove_dangling_images<C: EngineClient + ?Sized>(client: &C) -> Result<BulkReport> {
    let ids: Vec<String> = images::fetch(client)
        .await?
        .into_iter()
        .filter(|record| format::is_dangling(&record.repo_tags))
        .map(|record| record.id)
        .collect();
    if ids.is_empty() {
        return Ok(BulkReport::empty("No dangling images found"));
    }

    let report = force_remove_each(client, &ids, "Failed to remove image").await;
    report.log_summary("remove dangling images");
    Ok(report)
}
