// ABOUTME: Main library entry point for the Nutricost recipe costing API
// ABOUTME: Wires configuration, persistence backends, middleware and REST routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

#![deny(unsafe_code)]

//! # Nutricost Server
//!
//! A REST API for recipes built from ingredients. Every ingredient carries
//! nutrition facts and an append-only cost history; its current cost is derived
//! from the most recently dated entry.
//!
//! ## Architecture
//!
//! - **Models**: domain types and the cost history ledger (from `nutricost-core`)
//! - **Database plugins**: `DatabaseProvider` with `SQLite` and in-memory backends
//! - **Routes**: axum handlers for recipes, ingredients, nutrients and health
//! - **Middleware**: CORS, request ids and request tracing
//! - **Config**: environment driven server configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutricost_server::config::environment::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     nutricost_server::server::run_server(config).await
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and defaults
pub mod constants;

/// `SQLite` schema and table managers
pub mod database;

/// Storage abstraction with `SQLite` and in-memory backends
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Offset pagination
pub mod pagination;

/// Shared server state
pub mod resources;

/// REST route handlers
pub mod routes;

/// Router assembly and server bootstrap
pub mod server;

/// Payload validation
pub mod validation;
