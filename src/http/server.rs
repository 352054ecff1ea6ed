//! Listener, middleware stack and graceful shutdown.

use std::future::Future;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::router;
use crate::api::Api;
use crate::config::ServerConfig;
use crate::engine::EngineFactory;
use crate::error::{ConfigError, Result, ServerError};

/// Build the CORS policy for the configured browser origins.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when an origin is the `*` wildcard,
/// which cannot be combined with credentialed requests, or is not a valid
/// header value.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allowed = origins
        .iter()
        .map(|origin| parse_origin(origin))
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}

fn parse_origin(origin: &str) -> Result<HeaderValue> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        field: String::from("server.cors_allowed_origins"),
        reason,
    };
    if origin.trim() == "*" {
        return Err(invalid(String::from(
            "the '*' wildcard cannot be listed; name each allowed origin",
        ))
        .into());
    }
    HeaderValue::from_str(origin)
        .map_err(|error| invalid(format!("'{origin}' is not a valid origin: {error}")).into())
}

/// Assemble the full application: routes, CORS and request tracing.
///
/// # Errors
///
/// Returns a configuration error when the CORS origins are invalid.
pub fn app<F: EngineFactory>(api: Api<F>, server: &ServerConfig) -> Result<Router> {
    Ok(router(api)
        .layer(cors_layer(&server.cors_allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// Bind the configured address.
///
/// # Errors
///
/// Returns `ServerError::BindFailed` when the address cannot be bound.
pub async fn bind(server: &ServerConfig) -> Result<TcpListener> {
    let address = format!("{}:{}", server.bind_address, server.port);
    let listener = TcpListener::bind((server.bind_address.as_str(), server.port))
        .await
        .map_err(|error| ServerError::BindFailed {
            address: address.clone(),
            message: error.to_string(),
        })?;
    info!(address = %address, "listening");
    Ok(listener)
}

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// In-flight requests are drained before this returns.
///
/// # Errors
///
/// Returns `ServerError::ServeFailed` when the accept loop fails.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|error| ServerError::ServeFailed {
            message: error.to_string(),
        })?;
    info!("server stopped");
    Ok(())
}

/// Resolve on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(error = %error, "failed to install Ctrl-C handler; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
