//! Normalisation of engine-native values into stable response fields.
//!
//! Every function here is pure and total: malformed or out-of-range inputs
//! produce a well-defined fallback instead of an error.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::engine::StatsSample;

/// Repo-tag placeholder some engines report for untagged images.
const UNTAGGED_PLACEHOLDER: &str = "<none>:<none>";

/// Tag assumed when a repo-tag carries none.
const DEFAULT_TAG: &str = "latest";

const BYTES_PER_MEGABYTE_SHIFT: u32 = 20;
const HALF_MEGABYTE: u64 = 1 << (BYTES_PER_MEGABYTE_SHIFT - 1);

/// Format a byte count as whole megabytes, rounding exact halves to even.
///
/// Negative sizes, which the engine uses for "unknown", format as `0 MB`.
#[must_use]
pub fn format_size_mb(bytes: i64) -> String {
    let megabytes = u64::try_from(bytes).map_or(0, round_megabytes);
    format!("{megabytes} MB")
}

fn round_megabytes(size: u64) -> u64 {
    let whole = size >> BYTES_PER_MEGABYTE_SHIFT;
    let remainder = size & ((1 << BYTES_PER_MEGABYTE_SHIFT) - 1);
    let round_up = remainder > HALF_MEGABYTE || (remainder == HALF_MEGABYTE && whole % 2 == 1);
    whole + u64::from(round_up)
}

/// Format unix epoch seconds as an RFC 3339 UTC timestamp.
///
/// Values before the epoch or beyond the representable range clamp to the
/// epoch.
#[must_use]
pub fn format_timestamp(epoch_seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_seconds.max(0), 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whether an image's repo-tag list marks it as dangling.
#[must_use]
pub fn is_dangling(repo_tags: &[String]) -> bool {
    repo_tags.iter().all(|tag| tag == UNTAGGED_PLACEHOLDER)
}

/// Split the first repo-tag into `(name, tag)`.
///
/// The split happens on the first colon. A repo-tag without a colon is given
/// the `latest` tag; a dangling list yields two empty strings.
#[must_use]
pub fn split_repo_tag(repo_tags: &[String]) -> (String, String) {
    if is_dangling(repo_tags) {
        return (String::new(), String::new());
    }

    let first = repo_tags.first().map_or("", String::as_str);
    first.split_once(':').map_or_else(
        || (first.to_owned(), DEFAULT_TAG.to_owned()),
        |(name, tag)| (name.to_owned(), tag.to_owned()),
    )
}

/// Parse the exit code from an engine status such as `Exited (137) 2 hours ago`.
#[must_use]
pub fn parse_exit_code(status: &str) -> Option<i64> {
    let (code, _) = status.strip_prefix("Exited (")?.split_once(')')?;
    code.trim().parse().ok()
}

/// Decode collected log bytes, replacing invalid UTF-8.
#[must_use]
pub fn logs_to_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// CPU usage of a stats sample as a percentage of host capacity.
///
/// Uses the delta between the sample and the previous one, scaled by the
/// number of online CPUs. When no previous sample exists the cumulative
/// totals are used. A zero denominator yields `0.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "usage percentages are reported as floating point"
)]
pub fn cpu_percent(sample: &StatsSample) -> f64 {
    if sample.precpu_total == 0 && sample.presystem == 0 {
        if sample.system == 0 {
            return 0.0;
        }
        return sample.cpu_total as f64 / sample.system as f64 * 100.0;
    }

    let cpu_delta = sample.cpu_total.saturating_sub(sample.precpu_total);
    let system_delta = sample.system.saturating_sub(sample.presystem);
    if system_delta == 0 {
        return 0.0;
    }

    let cpus = f64::from(sample.online_cpus.max(1));
    cpu_delta as f64 / system_delta as f64 * cpus * 100.0
}

/// Memory usage of a stats sample as a percentage of the container limit.
///
/// A zero limit yields `0.0`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "usage percentages are reported as floating point"
)]
pub fn memory_percent(sample: &StatsSample) -> f64 {
    if sample.memory_limit == 0 {
        return 0.0;
    }
    sample.memory_usage as f64 / sample.memory_limit as f64 * 100.0
}
