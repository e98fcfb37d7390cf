// ABOUTME: Health check and welcome route handlers for service monitoring
// ABOUTME: Provides the root greeting plus liveness and readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! Health check routes for service monitoring
//!
//! `/health` answers as long as the process is up. `/ready` also reports the
//! active storage backend.

use crate::constants::service_names;
use crate::database_plugins::DatabaseProvider;
use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the root and health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn root_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({ "message": service_names::WELCOME_MESSAGE }))
        }

        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "ready",
                "backend": resources.database.backend_info(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
