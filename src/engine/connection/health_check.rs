//! Engine health check.

use std::time::Duration;

use crate::engine::EngineClient;
use crate::error::{DockhandError, EngineError};

/// Timeout in seconds for health check operations.
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 10;

/// Ping the engine, failing if it does not answer within
/// [`HEALTH_CHECK_TIMEOUT_SECS`].
///
/// This confirms the engine is operational, not just that a client could be
/// created for the socket.
///
/// # Errors
///
/// Returns `EngineError::HealthCheckFailed` if the engine answers with an
/// error, or `EngineError::HealthCheckTimeout` if it does not answer in time.
pub async fn ping_with_timeout<C: EngineClient + ?Sized>(client: &C) -> Result<(), DockhandError> {
    ping_within(client, HEALTH_CHECK_TIMEOUT_SECS, Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
        .await
}

async fn ping_within<C: EngineClient + ?Sized>(
    client: &C,
    reported_secs: u64,
    timeout: Duration,
) -> Result<(), DockhandError> {
    tokio::time::timeout(timeout, client.ping())
        .await
        .map_err(|_| {
            DockhandError::from(EngineError::HealthCheckTimeout {
                seconds: reported_secs,
            })
        })?
        .map_err(|error| {
            DockhandError::from(EngineError::HealthCheckFailed {
                message: error.to_string(),
            })
        })
}
