//! Engine-neutral records returned by [`EngineClient`](super::EngineClient).
//!
//! Collection calls are flattened into these records at the transport seam so
//! the adapter operations and their tests do not depend on the shape of the
//! generated engine models.

use std::collections::BTreeMap;

/// One entry of the engine's container list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerRecord {
    /// Full container identifier.
    pub id: String,
    /// Image reference the container was created from.
    pub image: String,
    /// Human-readable status, e.g. `Up 2 hours` or `Exited (0) 3 minutes ago`.
    pub status: String,
    /// Machine-readable state, e.g. `running` or `exited`.
    pub state: String,
    /// Names of the volumes mounted into the container.
    pub mounts: Vec<String>,
}

/// One entry of the engine's image list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRecord {
    /// Image identifier, usually `sha256:...`.
    pub id: String,
    /// Repository tags referencing the image.
    pub repo_tags: Vec<String>,
    /// Creation time as unix epoch seconds.
    pub created: i64,
    /// Size in bytes.
    pub size: i64,
}

/// A network as reported by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRecord {
    /// Network identifier.
    pub id: String,
    /// Network name.
    pub name: String,
    /// Driver backing the network, e.g. `bridge`.
    pub driver: String,
    /// Scope of the network, e.g. `local`.
    pub scope: String,
    /// Attached containers keyed by id, valued by name. Only populated by
    /// inspect; list calls leave it empty.
    pub containers: BTreeMap<String, String>,
}

/// A volume as reported by the engine's volume list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeRecord {
    /// Volume name.
    pub name: String,
    /// Volume driver, e.g. `local`.
    pub driver: String,
    /// Host path of the volume data.
    pub mountpoint: String,
}

/// A single resource-usage sample for a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSample {
    /// Total CPU time consumed by the container, in nanoseconds.
    pub cpu_total: u64,
    /// `cpu_total` at the previous sample, or zero when none was taken.
    pub precpu_total: u64,
    /// Total host CPU time, in nanoseconds.
    pub system: u64,
    /// `system` at the previous sample, or zero when none was taken.
    pub presystem: u64,
    /// Number of CPUs available to the container.
    pub online_cpus: u32,
    /// Memory currently used, in bytes.
    pub memory_usage: u64,
    /// Memory limit, in bytes.
    pub memory_limit: u64,
}

/// Which streams to collect from a container's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Include standard output.
    pub stdout: bool,
    /// Include standard error.
    pub stderr: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            stdout: true,
            stderr: true,
        }
    }
}
