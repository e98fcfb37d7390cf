// ABOUTME: Route handlers for the recipes REST API
// ABOUTME: Create, list, fetch, fully replace and delete recipes with their ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! Recipe routes
//!
//! `PUT /recipes/:id` is a full replace: every existing ingredient of the
//! recipe is deleted, along with its cost history and nutrient amounts, and
//! the submitted list is created fresh.

use crate::{
    database_plugins::DatabaseProvider,
    errors::AppError,
    models::RecipeCreate,
    pagination::{PageParams, PageQuery},
    resources::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/recipes/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /recipes - Create a recipe and its ingredients
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RecipeCreate>,
    ) -> Result<Response, AppError> {
        let recipe = resources.database.create_recipe(&body).await?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle GET /recipes - List recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let recipes = resources
            .database
            .list_recipes(PageParams::from(query))
            .await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /recipes/:id - Get a specific recipe
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let recipe = resources.database.get_recipe(id).await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle PUT /recipes/:id - Replace a recipe
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<RecipeCreate>,
    ) -> Result<Response, AppError> {
        let recipe = resources.database.update_recipe(id, &body).await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle DELETE /recipes/:id - Delete a recipe and its ingredients
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        resources.database.delete_recipe(id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
