//! REST façade over a Docker-compatible container engine.
//!
//! `dockhand` exposes container, image, network and volume management of a
//! local Docker or Podman daemon as a small JSON-over-HTTP API. The service is
//! stateless: every request opens an engine client, performs one operation (or
//! one bulk sweep) and shapes the engine's answer into a client-friendly body.
//!
//! # Modules
//!
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`engine`]: Engine connection, adapter operations and bulk removal
//! - [`api`]: Request validation and response shaping, independent of HTTP
//! - [`http`]: axum router, error-to-status mapping and server start-up
//! - [`format`]: Size, timestamp, tag, exit-code and usage formatting
//! - [`error`]: Semantic error types for the application

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod http;
