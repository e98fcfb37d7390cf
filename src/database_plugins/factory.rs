// ABOUTME: Database factory and provider abstraction for multi-backend support
// ABOUTME: Selects the SQLite or in-memory backend from the database URL at runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! Database factory for creating database providers
//!
//! This module provides automatic database type detection and creation
//! based on connection strings.

use super::memory::InMemoryDatabase;
use super::sqlite::SqliteDatabase;
use super::DatabaseProvider;
use crate::constants::database_schemes;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CostEntry, CostEntryInput, Ingredient, IngredientCreate, IngredientNutrient, Nutrient,
    NutrientCreate, Recipe, RecipeCreate,
};
use crate::pagination::PageParams;
use async_trait::async_trait;
use tracing::{debug, info};

/// Supported database types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// `SQLite` file or in-memory `SQLite`
    SQLite,
    /// Plain in-process store
    InMemory,
}

/// Database instance wrapper that delegates to the appropriate implementation
#[derive(Clone)]
pub enum Database {
    /// `SQLite` backend
    SQLite(SqliteDatabase),
    /// In-memory backend
    InMemory(InMemoryDatabase),
}

impl Database {
    /// Get the database type enum
    #[must_use]
    pub const fn database_type(&self) -> DatabaseType {
        match self {
            Self::SQLite(_) => DatabaseType::SQLite,
            Self::InMemory(_) => DatabaseType::InMemory,
        }
    }

    /// Create a new database instance based on the connection string
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database URL format is unsupported
    /// - Database connection fails
    /// - Schema creation fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        debug!("Detecting database type from URL: {database_url}");
        let db_type = detect_database_type(database_url)?;
        info!("Detected database type: {db_type:?}");

        match db_type {
            DatabaseType::SQLite => {
                let db = SqliteDatabase::new(database_url).await?;
                Ok(Self::SQLite(db))
            }
            DatabaseType::InMemory => {
                let db = InMemoryDatabase::new(database_url).await?;
                Ok(Self::InMemory(db))
            }
        }
    }
}

/// Automatically detect database type from connection string
///
/// # Errors
///
/// Returns an error if the URL starts with neither `sqlite:` nor `memory://`
pub fn detect_database_type(database_url: &str) -> AppResult<DatabaseType> {
    let url = database_url.trim();
    if url.starts_with(database_schemes::SQLITE) {
        Ok(DatabaseType::SQLite)
    } else if url.starts_with(database_schemes::MEMORY) {
        Ok(DatabaseType::InMemory)
    } else {
        Err(AppError::config(format!(
            "Unsupported database URL format: {database_url}. \
             Supported formats: sqlite:path/to/db.sqlite, sqlite::memory:, memory://"
        )))
    }
}

// Implement DatabaseProvider for the enum by delegating to the appropriate implementation
#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> AppResult<Self> {
        Self::new(database_url).await
    }

    async fn migrate(&self) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.migrate().await,
            Self::InMemory(db) => db.migrate().await,
        }
    }

    fn backend_info(&self) -> &'static str {
        match self {
            Self::SQLite(db) => db.backend_info(),
            Self::InMemory(db) => db.backend_info(),
        }
    }

    async fn create_recipe(&self, recipe: &RecipeCreate) -> AppResult<Recipe> {
        match self {
            Self::SQLite(db) => db.create_recipe(recipe).await,
            Self::InMemory(db) => db.create_recipe(recipe).await,
        }
    }

    async fn get_recipe(&self, recipe_id: i64) -> AppResult<Recipe> {
        match self {
            Self::SQLite(db) => db.get_recipe(recipe_id).await,
            Self::InMemory(db) => db.get_recipe(recipe_id).await,
        }
    }

    async fn list_recipes(&self, page: PageParams) -> AppResult<Vec<Recipe>> {
        match self {
            Self::SQLite(db) => db.list_recipes(page).await,
            Self::InMemory(db) => db.list_recipes(page).await,
        }
    }

    async fn update_recipe(&self, recipe_id: i64, recipe: &RecipeCreate) -> AppResult<Recipe> {
        match self {
            Self::SQLite(db) => db.update_recipe(recipe_id, recipe).await,
            Self::InMemory(db) => db.update_recipe(recipe_id, recipe).await,
        }
    }

    async fn delete_recipe(&self, recipe_id: i64) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.delete_recipe(recipe_id).await,
            Self::InMemory(db) => db.delete_recipe(recipe_id).await,
        }
    }

    async fn create_ingredient(
        &self,
        recipe_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        match self {
            Self::SQLite(db) => db.create_ingredient(recipe_id, ingredient).await,
            Self::InMemory(db) => db.create_ingredient(recipe_id, ingredient).await,
        }
    }

    async fn get_ingredient(&self, ingredient_id: i64) -> AppResult<Ingredient> {
        match self {
            Self::SQLite(db) => db.get_ingredient(ingredient_id).await,
            Self::InMemory(db) => db.get_ingredient(ingredient_id).await,
        }
    }

    async fn list_ingredients(&self, page: PageParams) -> AppResult<Vec<Ingredient>> {
        match self {
            Self::SQLite(db) => db.list_ingredients(page).await,
            Self::InMemory(db) => db.list_ingredients(page).await,
        }
    }

    async fn update_ingredient(
        &self,
        ingredient_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        match self {
            Self::SQLite(db) => db.update_ingredient(ingredient_id, ingredient).await,
            Self::InMemory(db) => db.update_ingredient(ingredient_id, ingredient).await,
        }
    }

    async fn delete_ingredient(&self, ingredient_id: i64) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.delete_ingredient(ingredient_id).await,
            Self::InMemory(db) => db.delete_ingredient(ingredient_id).await,
        }
    }

    async fn add_cost_entry(
        &self,
        ingredient_id: i64,
        entry: &CostEntryInput,
    ) -> AppResult<Ingredient> {
        match self {
            Self::SQLite(db) => db.add_cost_entry(ingredient_id, entry).await,
            Self::InMemory(db) => db.add_cost_entry(ingredient_id, entry).await,
        }
    }

    async fn get_cost_history(&self, ingredient_id: i64) -> AppResult<Vec<CostEntry>> {
        match self {
            Self::SQLite(db) => db.get_cost_history(ingredient_id).await,
            Self::InMemory(db) => db.get_cost_history(ingredient_id).await,
        }
    }

    async fn create_nutrient(&self, nutrient: &NutrientCreate) -> AppResult<Nutrient> {
        match self {
            Self::SQLite(db) => db.create_nutrient(nutrient).await,
            Self::InMemory(db) => db.create_nutrient(nutrient).await,
        }
    }

    async fn get_nutrient(&self, nutrient_id: i64) -> AppResult<Nutrient> {
        match self {
            Self::SQLite(db) => db.get_nutrient(nutrient_id).await,
            Self::InMemory(db) => db.get_nutrient(nutrient_id).await,
        }
    }

    async fn get_nutrient_by_name(&self, name: &str) -> AppResult<Nutrient> {
        match self {
            Self::SQLite(db) => db.get_nutrient_by_name(name).await,
            Self::InMemory(db) => db.get_nutrient_by_name(name).await,
        }
    }

    async fn list_nutrients(&self, page: PageParams) -> AppResult<Vec<Nutrient>> {
        match self {
            Self::SQLite(db) => db.list_nutrients(page).await,
            Self::InMemory(db) => db.list_nutrients(page).await,
        }
    }

    async fn delete_nutrient(&self, nutrient_id: i64) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.delete_nutrient(nutrient_id).await,
            Self::InMemory(db) => db.delete_nutrient(nutrient_id).await,
        }
    }

    async fn set_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
        amount: f64,
    ) -> AppResult<IngredientNutrient> {
        match self {
            Self::SQLite(db) => {
                db.set_ingredient_nutrient(ingredient_id, nutrient_id, amount)
                    .await
            }
            Self::InMemory(db) => {
                db.set_ingredient_nutrient(ingredient_id, nutrient_id, amount)
                    .await
            }
        }
    }

    async fn list_ingredient_nutrients(
        &self,
        ingredient_id: i64,
    ) -> AppResult<Vec<IngredientNutrient>> {
        match self {
            Self::SQLite(db) => db.list_ingredient_nutrients(ingredient_id).await,
            Self::InMemory(db) => db.list_ingredient_nutrients(ingredient_id).await,
        }
    }

    async fn remove_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
    ) -> AppResult<()> {
        match self {
            Self::SQLite(db) => db.remove_ingredient_nutrient(ingredient_id, nutrient_id).await,
            Self::InMemory(db) => {
                db.remove_ingredient_nutrient(ingredient_id, nutrient_id)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_database_type() {
        assert_eq!(
            detect_database_type("sqlite:./data/nutricost.db").unwrap(),
            DatabaseType::SQLite
        );
        assert_eq!(
            detect_database_type("sqlite::memory:").unwrap(),
            DatabaseType::SQLite
        );
        assert_eq!(
            detect_database_type("memory://").unwrap(),
            DatabaseType::InMemory
        );
        assert!(detect_database_type("postgres://localhost/db").is_err());
    }

    #[tokio::test]
    async fn test_factory_builds_requested_backend() {
        let memory = Database::new("memory://").await.unwrap();
        assert_eq!(memory.database_type(), DatabaseType::InMemory);

        let sqlite = Database::new("sqlite::memory:").await.unwrap();
        assert_eq!(sqlite.database_type(), DatabaseType::SQLite);
        assert!(sqlite.backend_info().contains("SQLite"));
    }
}
