//! Unit tests for dockhand configuration types.
//!
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Defaults and TOML parsing
//! - [`validation`] - Post-merge normalisation and validation
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence

mod helpers;
