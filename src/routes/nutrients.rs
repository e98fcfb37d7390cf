// ABOUTME: Route handlers for the nutrient catalog REST API
// ABOUTME: Create, list, look up by id or name, and delete nutrients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use crate::{
    database_plugins::DatabaseProvider,
    errors::AppError,
    models::NutrientCreate,
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

/// Nutrient catalog routes handler
pub struct NutrientRoutes;

impl NutrientRoutes {
    /// Create all nutrient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/nutrients",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/nutrients/by-name/:name", get(Self::handle_get_by_name))
            .route(
                "/nutrients/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /nutrients - 409 when the name is taken
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<NutrientCreate>,
    ) -> Result<Response, AppError> {
        let nutrient = resources.database.create_nutrient(&body).await?;
        Ok((StatusCode::CREATED, Json(nutrient)).into_response())
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let nutrients = resources
            .database
            .list_nutrients(PageParams::from(query))
            .await?;
        Ok((StatusCode::OK, Json(nutrients)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let nutrient = resources.database.get_nutrient(id).await?;
        Ok((StatusCode::OK, Json(nutrient)).into_response())
    }

    async fn handle_get_by_name(
        State(resources): State<Arc<ServerResources>>,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let nutrient = resources.database.get_nutrient_by_name(&name).await?;
        Ok((StatusCode::OK, Json(nutrient)).into_response())
    }

    /// Handle DELETE /nutrients/:id - Also removes every ingredient amount for it
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        resources.database.delete_nutrient(id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
