//! HTTP surface of the façade.
//!
//! The router maps each route onto one [`Api`] handler. Bodies arrive as raw
//! bytes so that malformed JSON is reported through the crate's own error
//! taxonomy rather than axum's extractor rejections.

mod error;
mod server;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use serde::Serialize;

use crate::api::Api;
use crate::engine::EngineFactory;
use crate::error::Result;

pub use server::{app, bind, cors_layer, serve, shutdown_signal};

/// Build the router for every REST route, bound to `api`.
#[must_use]
pub fn router<F: EngineFactory>(api: Api<F>) -> Router {
    Router::new()
        .route("/health", get(health::<F>))
        .route("/containers", get(list_running_containers::<F>))
        .route("/containers/all", get(list_all_containers::<F>))
        .route("/containers/start", post(start_container::<F>))
        .route("/containers/stop", post(stop_container::<F>))
        .route("/containers/remove", delete(remove_container::<F>))
        .route("/containers/remove/all", delete(remove_all_containers::<F>))
        .route("/containers/inspect", post(inspect_container::<F>))
        .route("/containers/logs", post(container_logs::<F>))
        .route("/containers/stats", post(container_stats::<F>))
        .route("/images", get(list_images::<F>))
        .route("/images/dangling", get(list_dangling_images::<F>))
        .route(
            "/images/inspect",
            get(inspect_image::<F>).post(inspect_image::<F>),
        )
        .route("/images/pull", post(pull_image::<F>))
        .route("/images/remove", delete(remove_image::<F>))
        .route("/images/remove/all", delete(remove_all_images::<F>))
        .route(
            "/images/dangling/remove/all",
            delete(remove_dangling_images::<F>),
        )
        .route("/networks", get(list_networks::<F>))
        .route("/networks/inspect", post(inspect_network::<F>))
        .route("/networks/containers", post(network_containers::<F>))
        .route("/networks/remove", delete(remove_network::<F>))
        .route("/volumes", get(list_volumes::<F>))
        .route("/volumes/inspect", post(inspect_volume::<F>))
        .route("/volumes/containers", post(volume_containers::<F>))
        .route("/volumes/remove", delete(remove_volume::<F>))
        .with_state(api)
}

fn respond<T: Serialize>(outcome: Result<T>) -> axum::response::Response {
    match outcome {
        Ok(body) => Json(body).into_response(),
        Err(error) => error.into_response(),
    }
}

async fn health<F: EngineFactory>(State(api): State<Api<F>>) -> impl IntoResponse {
    respond(api.health().await)
}

async fn list_running_containers<F: EngineFactory>(
    State(api): State<Api<F>>,
) -> impl IntoResponse {
    respond(api.list_running_containers().await)
}

async fn list_all_containers<F: EngineFactory>(State(api): State<Api<F>>) -> impl IntoResponse {
    respond(api.list_all_containers().await)
}

async fn start_container<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.start_container(&body).await)
}

async fn stop_container<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.stop_container(&body).await)
}

async fn remove_container<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.remove_container(&body).await)
}

async fn remove_all_containers<F: EngineFactory>(
    State(api): State<Api<F>>,
) -> impl IntoResponse {
    respond(api.remove_all_containers().await)
}

async fn inspect_container<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.inspect_container(&body).await)
}

async fn container_logs<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.container_logs(&body).await)
}

async fn container_stats<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.container_stats(&body).await)
}

async fn list_images<F: EngineFactory>(State(api): State<Api<F>>) -> impl IntoResponse {
    respond(api.list_images().await)
}

async fn list_dangling_images<F: EngineFactory>(
    State(api): State<Api<F>>,
) -> impl IntoResponse {
    respond(api.list_dangling_images().await)
}

async fn inspect_image<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.inspect_image(&body).await)
}

async fn pull_image<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.pull_image(&body).await)
}

async fn remove_image<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.remove_image(&body).await)
}

async fn remove_all_images<F: EngineFactory>(State(api): State<Api<F>>) -> impl IntoResponse {
    respond(api.remove_all_images().await)
}

async fn remove_dangling_images<F: EngineFactory>(
    State(api): State<Api<F>>,
) -> impl IntoResponse {
    respond(api.remove_dangling_images().await)
}

async fn list_networks<F: EngineFactory>(State(api): State<Api<F>>) -> impl IntoResponse {
    respond(api.list_networks().await)
}

async fn inspect_network<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.inspect_network(&body).await)
}

async fn network_containers<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.network_containers(&body).await)
}

async fn remove_network<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.remove_network(&body).await)
}

async fn list_volumes<F: EngineFactory>(State(api): State<Api<F>>) -> impl IntoResponse {
    respond(api.list_volumes().await)
}

async fn inspect_volume<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.inspect_volume(&body).await)
}

async fn volume_containers<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.volume_containers(&body).await)
}

async fn remove_volume<F: EngineFactory>(
    State(api): State<Api<F>>,
    body: Bytes,
) -> impl IntoResponse {
    respond(api.remove_volume(&body).await)
}
