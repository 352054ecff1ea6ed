//! Normalised views of engine-owned state, as returned to clients.

use std::collections::BTreeMap;

use serde::Serialize;

/// A container as listed by the façade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerView {
    /// Full container identifier.
    pub id: String,
    /// Image reference the container was created from.
    pub image: String,
    /// Human-readable engine status.
    pub status: String,
    /// Machine-readable engine state.
    pub state: String,
    /// Whether the engine reports the container as running.
    pub running: bool,
    /// Exit code parsed from an `Exited (N)` status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i64>,
}

/// A tagged image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    /// Image identifier.
    pub id: String,
    /// Repository name from the first repo-tag.
    pub name: String,
    /// Tag from the first repo-tag.
    pub tag: String,
    /// RFC 3339 creation timestamp.
    pub created: String,
    /// Size in whole megabytes, e.g. `2 MB`.
    pub size: String,
}

/// An image without repository tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingImageView {
    /// Image identifier.
    pub id: String,
    /// RFC 3339 creation timestamp.
    pub created: String,
    /// Size in whole megabytes.
    pub size: String,
}

/// A network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkView {
    /// Network identifier.
    pub id: String,
    /// Network name.
    pub name: String,
    /// Network driver.
    pub driver: String,
    /// Network scope.
    pub scope: String,
    /// Attached containers, id to name. Present on inspect only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub containers: Option<BTreeMap<String, String>>,
}

/// A container attached to a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkContainerView {
    /// Container identifier.
    pub container_id: String,
    /// Container name as known to the network.
    pub name: String,
}

/// A volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeView {
    /// Volume name.
    pub name: String,
    /// Volume driver.
    pub driver: String,
    /// Host path of the volume data.
    pub mountpoint: String,
}

/// A resource-usage snapshot for one container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerStatsView {
    /// Container identifier as requested.
    pub id: String,
    /// CPU usage as a percentage of host capacity.
    pub cpu_usage_percent: f64,
    /// Memory usage as a percentage of the container limit.
    pub memory_usage_percent: f64,
}

/// The collected log of one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerLogsView {
    /// Container identifier as requested.
    pub id: String,
    /// Combined stdout and stderr text.
    pub logs: String,
}
