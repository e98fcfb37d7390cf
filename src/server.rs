// ABOUTME: Router assembly and HTTP server lifecycle for the Nutricost API
// ABOUTME: Merges domain routers, applies CORS, request id and tracing layers, and serves until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! # Server
//!
//! [`build_router`] is what the integration tests drive in-process;
//! [`run_server`] is what the binary calls.

use crate::config::environment::ServerConfig;
use crate::database_plugins::{factory::Database, DatabaseProvider};
use crate::middleware::{make_request_span, record_response, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, IngredientRoutes, NutrientRoutes, RecipeRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the complete application router
///
/// Layers are listed innermost first, so CORS runs first and the request id
/// is assigned before the trace span is created.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(RecipeRoutes::routes(resources.clone()))
        .merge(IngredientRoutes::routes(resources.clone()))
        .merge(NutrientRoutes::routes(resources))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(record_response),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

/// Open the configured database and serve HTTP until ctrl-c
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the address cannot be
/// bound, or the server fails while running
pub async fn run_server(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let database_url = config.database.url.to_connection_string();
    let database = Database::new(&database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;
    info!(
        backend = database.backend_info(),
        url = %database_url,
        "Database initialized successfully"
    );

    let bind_address = config.bind_address();
    let resources = Arc::new(ServerResources::new(database, config));
    let app = build_router(resources);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!(address = %bind_address, "Nutricost API listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
