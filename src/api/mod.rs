//! Request orchestration for the REST façade.
//!
//! This module holds the resource handlers: each one validates the request
//! payload, opens an engine client for the request, runs one adapter
//! operation under the request deadline, and shapes the response body.
//!
//! Handlers accept raw body bytes and return serialisable, library-owned
//! response types. They know nothing about the HTTP framework, so the same
//! logic is available to the `http` module and to library embedders.

mod containers;
mod images;
mod networks;
mod volumes;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::engine::{BulkReport, BulkSummary, EngineFactory, NetworkContainerView};
use crate::error::{EngineError, RequestError, Result};

/// Body of unary container, image and network requests.
#[derive(Debug, Default, Deserialize)]
pub struct IdRequest {
    /// Target identifier.
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of unary volume requests.
#[derive(Debug, Default, Deserialize)]
pub struct NameRequest {
    /// Target volume name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of image pull requests.
#[derive(Debug, Default, Deserialize)]
pub struct PullRequest {
    /// Image reference, e.g. `nginx:1.27`.
    #[serde(default)]
    pub image: Option<String>,
}

/// A single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a bulk removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkResponse {
    /// Overall label, e.g. `Containers Deleted`.
    pub message: String,
    /// One outcome line per item, or a single informational line.
    pub details: Vec<String>,
    /// Per-outcome counts.
    pub summary: BulkSummary,
}

impl BulkResponse {
    fn from_report(message: &str, report: &BulkReport) -> Self {
        Self {
            message: message.to_owned(),
            details: report.lines(),
            summary: report.summary(),
        }
    }
}

/// A collection, or an informational message when it is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    /// The collection members.
    Items(Vec<T>),
    /// Informational message standing in for an empty collection.
    Notice(MessageResponse),
}

impl<T> Listing<T> {
    fn or_notice(items: Vec<T>, notice: &str) -> Self {
        if items.is_empty() {
            Self::Notice(MessageResponse::new(notice))
        } else {
            Self::Items(items)
        }
    }
}

/// Containers attached to a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkContainersResponse {
    /// The attached containers.
    pub containers_attached_to_network: Vec<NetworkContainerView>,
}

/// Containers attached to a volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeContainersResponse {
    /// Fixed label.
    pub message: String,
    /// Ids of the containers mounting the volume.
    pub container_ids: Vec<String>,
}

/// Resource handlers bound to an engine factory and a request deadline.
pub struct Api<F> {
    factory: Arc<F>,
    deadline: Duration,
}

impl<F> Clone for Api<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            deadline: self.deadline,
        }
    }
}

impl<F: EngineFactory> Api<F> {
    /// Create handlers that open clients through `factory` and give each
    /// adapter call `deadline` to complete.
    #[must_use]
    pub fn new(factory: F, deadline: Duration) -> Self {
        Self {
            factory: Arc::new(factory),
            deadline,
        }
    }

    /// The engine factory used for each request.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Check that the engine answers a ping.
    ///
    /// # Errors
    ///
    /// Returns an engine connection or health check error.
    pub async fn health(&self) -> Result<MessageResponse> {
        let client = self.factory.connect()?;
        crate::engine::ping_with_timeout(&client).await?;
        Ok(MessageResponse::new("Container engine is reachable"))
    }

    /// Run one adapter call under the request deadline.
    async fn within<T>(
        &self,
        operation: &str,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.deadline, call)
            .await
            .map_err(|_| EngineError::Timeout {
                operation: operation.to_owned(),
                seconds: self.deadline.as_secs(),
            })?
    }
}

/// Decode a JSON request body.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|error| {
        RequestError::MalformedBody {
            message: error.to_string(),
        }
        .into()
    })
}

/// Require a non-blank field, returning it trimmed.
fn require(field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or_else(|| {
            RequestError::MissingField {
                field: field.to_owned(),
            }
            .into()
        })
}

fn require_id(body: &[u8]) -> Result<String> {
    require("id", parse_body::<IdRequest>(body)?.id)
}

fn require_name(body: &[u8]) -> Result<String> {
    require("name", parse_body::<NameRequest>(body)?.name)
}
