// ABOUTME: Route handlers for the ingredients REST API
// ABOUTME: Ingredient CRUD, the cost history ledger and per-ingredient nutrient amounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! Ingredient routes
//!
//! `POST /ingredients/:id` takes the id of the owning recipe; every other
//! `/ingredients/:id` route takes an ingredient id.

use crate::{
    database_plugins::DatabaseProvider,
    errors::AppError,
    models::{CostEntryInput, IngredientCreate, NutrientAmount},
    pagination::{PageParams, PageQuery},
    resources::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;

/// Ingredient routes handler
pub struct IngredientRoutes;

impl IngredientRoutes {
    /// Create all ingredient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/ingredients", get(Self::handle_list))
            .route(
                "/ingredients/:id",
                post(Self::handle_create)
                    .get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route("/ingredients/:id/cost", post(Self::handle_add_cost))
            .route(
                "/ingredients/:id/cost_history",
                get(Self::handle_cost_history),
            )
            .route("/ingredients/:id/nutrients", get(Self::handle_list_nutrients))
            .route(
                "/ingredients/:id/nutrients/:nutrient_id",
                put(Self::handle_set_nutrient).delete(Self::handle_remove_nutrient),
            )
            .with_state(resources)
    }

    /// Handle POST /ingredients/:recipe_id - Add an ingredient to a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Path(recipe_id): Path<i64>,
        Json(body): Json<IngredientCreate>,
    ) -> Result<Response, AppError> {
        let ingredient = resources
            .database
            .create_ingredient(recipe_id, &body)
            .await?;
        Ok((StatusCode::CREATED, Json(ingredient)).into_response())
    }

    /// Handle GET /ingredients - List ingredients across all recipes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let ingredients = resources
            .database
            .list_ingredients(PageParams::from(query))
            .await?;
        Ok((StatusCode::OK, Json(ingredients)).into_response())
    }

    /// Handle GET /ingredients/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let ingredient = resources.database.get_ingredient(id).await?;
        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    /// Handle PUT /ingredients/:id - Update, recording a cost change in the history
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<IngredientCreate>,
    ) -> Result<Response, AppError> {
        let ingredient = resources.database.update_ingredient(id, &body).await?;
        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    /// Handle DELETE /ingredients/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        resources.database.delete_ingredient(id).await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /ingredients/:id/cost - Append a cost entry
    async fn handle_add_cost(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
        Json(body): Json<CostEntryInput>,
    ) -> Result<Response, AppError> {
        let ingredient = resources.database.add_cost_entry(id, &body).await?;
        Ok((StatusCode::OK, Json(ingredient)).into_response())
    }

    /// Handle GET /ingredients/:id/cost_history - History, newest first
    async fn handle_cost_history(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let history = resources.database.get_cost_history(id).await?;
        Ok((StatusCode::OK, Json(history)).into_response())
    }

    async fn handle_list_nutrients(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let amounts = resources.database.list_ingredient_nutrients(id).await?;
        Ok((StatusCode::OK, Json(amounts)).into_response())
    }

    /// Handle PUT /ingredients/:id/nutrients/:nutrient_id - Upsert an amount per 100 g
    async fn handle_set_nutrient(
        State(resources): State<Arc<ServerResources>>,
        Path((id, nutrient_id)): Path<(i64, i64)>,
        Json(body): Json<NutrientAmount>,
    ) -> Result<Response, AppError> {
        let link = resources
            .database
            .set_ingredient_nutrient(id, nutrient_id, body.amount)
            .await?;
        Ok((StatusCode::OK, Json(link)).into_response())
    }

    async fn handle_remove_nutrient(
        State(resources): State<Arc<ServerResources>>,
        Path((id, nutrient_id)): Path<(i64, i64)>,
    ) -> Result<Response, AppError> {
        resources
            .database
            .remove_ingredient_nutrient(id, nutrient_id)
            .await?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
