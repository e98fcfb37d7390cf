// ABOUTME: Centralized resource container shared by every route handler
// ABOUTME: Owns the selected database backend and the server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! # Server Resources Module
//!
//! Built once at startup and handed to the routers as axum `State`.

use crate::config::environment::ServerConfig;
use crate::database_plugins::factory::Database;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Selected storage backend
    pub database: Arc<Database>,
    /// Effective configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self {
            database: Arc::new(database),
            config: Arc::new(config),
        }
    }
}
