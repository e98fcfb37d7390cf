// ABOUTME: SQLite backend for the DatabaseProvider trait
// ABOUTME: Owns the sqlx pool and delegates to the per-table managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! `SQLite` database implementation
//!
//! In-memory `SQLite` lives only as long as its connection, so a
//! `sqlite::memory:` URL gets a pool of exactly one connection that is never
//! recycled. File databases get a small WAL pool.
//!
//! Composite writes read before they write, and a deferred transaction that
//! has already read cannot wait for the write lock: `SQLite` fails it with
//! `SQLITE_BUSY` regardless of the busy timeout. Every mutation therefore
//! holds the store's write mutex for its whole transaction, while reads run
//! concurrently against WAL snapshots.

use super::DatabaseProvider;
use crate::config::environment::DatabaseUrl;
use crate::constants::defaults;
use crate::database::{self, IngredientsManager, NutrientsManager, RecipesManager};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CostEntry, CostEntryInput, Ingredient, IngredientCreate, IngredientNutrient, Nutrient,
    NutrientCreate, Recipe, RecipeCreate,
};
use crate::pagination::PageParams;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
    /// Serializes writers; clones share it
    write_lock: Arc<Mutex<()>>,
}

impl SqliteDatabase {
    async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    fn ingredients(&self) -> IngredientsManager {
        IngredientsManager::new(self.pool.clone())
    }

    fn nutrients(&self) -> NutrientsManager {
        NutrientsManager::new(self.pool.clone())
    }

    async fn connect(database_url: &str) -> AppResult<SqlitePool> {
        let parsed = DatabaseUrl::parse_url(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL: {e}")))?;

        let pool_options = match &parsed {
            DatabaseUrl::SqliteMemory => SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None),
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                SqlitePoolOptions::new().max_connections(defaults::SQLITE_MAX_CONNECTIONS)
            }
            DatabaseUrl::InMemory => {
                return Err(AppError::config(
                    "memory:// is served by the in-memory backend, not SQLite",
                ));
            }
        };

        let connect_options = SqliteConnectOptions::from_str(&parsed.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(defaults::SQLITE_BUSY_TIMEOUT_SECS));
        let connect_options = if parsed.is_memory() {
            connect_options
        } else {
            connect_options.journal_mode(SqliteJournalMode::Wal)
        };

        debug!(url = %parsed, "Connecting to SQLite");
        pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to SQLite: {e}")))
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        let db = Self {
            pool: Self::connect(database_url).await?,
            write_lock: Arc::new(Mutex::new(())),
        };
        db.migrate().await?;
        info!(url = %database_url, "SQLite database ready");
        Ok(db)
    }

    async fn migrate(&self) -> AppResult<()> {
        let _guard = self.write_guard().await;
        database::migrate(&self.pool).await
    }

    fn backend_info(&self) -> &'static str {
        "SQLite (sqlx)"
    }

    async fn create_recipe(&self, recipe: &RecipeCreate) -> AppResult<Recipe> {
        let _guard = self.write_guard().await;
        self.recipes().create(recipe).await
    }

    async fn get_recipe(&self, recipe_id: i64) -> AppResult<Recipe> {
        self.recipes().get(recipe_id).await
    }

    async fn list_recipes(&self, page: PageParams) -> AppResult<Vec<Recipe>> {
        self.recipes().list(page).await
    }

    async fn update_recipe(&self, recipe_id: i64, recipe: &RecipeCreate) -> AppResult<Recipe> {
        let _guard = self.write_guard().await;
        self.recipes().update(recipe_id, recipe).await
    }

    async fn delete_recipe(&self, recipe_id: i64) -> AppResult<()> {
        let _guard = self.write_guard().await;
        self.recipes().delete(recipe_id).await
    }

    async fn create_ingredient(
        &self,
        recipe_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        let _guard = self.write_guard().await;
        self.ingredients().create(recipe_id, ingredient).await
    }

    async fn get_ingredient(&self, ingredient_id: i64) -> AppResult<Ingredient> {
        self.ingredients().get(ingredient_id).await
    }

    async fn list_ingredients(&self, page: PageParams) -> AppResult<Vec<Ingredient>> {
        self.ingredients().list(page).await
    }

    async fn update_ingredient(
        &self,
        ingredient_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        let _guard = self.write_guard().await;
        self.ingredients().update(ingredient_id, ingredient).await
    }

    async fn delete_ingredient(&self, ingredient_id: i64) -> AppResult<()> {
        let _guard = self.write_guard().await;
        self.ingredients().delete(ingredient_id).await
    }

    async fn add_cost_entry(
        &self,
        ingredient_id: i64,
        entry: &CostEntryInput,
    ) -> AppResult<Ingredient> {
        let _guard = self.write_guard().await;
        self.ingredients().add_cost_entry(ingredient_id, entry).await
    }

    async fn get_cost_history(&self, ingredient_id: i64) -> AppResult<Vec<CostEntry>> {
        self.ingredients().cost_history(ingredient_id).await
    }

    async fn create_nutrient(&self, nutrient: &NutrientCreate) -> AppResult<Nutrient> {
        let _guard = self.write_guard().await;
        self.nutrients().create(nutrient).await
    }

    async fn get_nutrient(&self, nutrient_id: i64) -> AppResult<Nutrient> {
        self.nutrients().get(nutrient_id).await
    }

    async fn get_nutrient_by_name(&self, name: &str) -> AppResult<Nutrient> {
        self.nutrients().get_by_name(name).await
    }

    async fn list_nutrients(&self, page: PageParams) -> AppResult<Vec<Nutrient>> {
        self.nutrients().list(page).await
    }

    async fn delete_nutrient(&self, nutrient_id: i64) -> AppResult<()> {
        let _guard = self.write_guard().await;
        self.nutrients().delete(nutrient_id).await
    }

    async fn set_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
        amount: f64,
    ) -> AppResult<IngredientNutrient> {
        let _guard = self.write_guard().await;
        self.nutrients()
            .set_ingredient_amount(ingredient_id, nutrient_id, amount)
            .await
    }

    async fn list_ingredient_nutrients(
        &self,
        ingredient_id: i64,
    ) -> AppResult<Vec<IngredientNutrient>> {
        self.nutrients().list_ingredient_amounts(ingredient_id).await
    }

    async fn remove_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
    ) -> AppResult<()> {
        let _guard = self.write_guard().await;
        self.nutrients()
            .remove_ingredient_amount(ingredient_id, nutrient_id)
            .await
    }
}
