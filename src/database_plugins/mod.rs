// ABOUTME: Storage abstraction layer for the Nutricost server
// ABOUTME: Plugin architecture with SQLite and in-memory backends behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! # Database Plugins
//!
//! [`DatabaseProvider`] exposes every recipe, ingredient, cost history and
//! nutrient operation. Both backends validate payloads before mutating
//! anything and report missing records as `ResourceNotFound`, so the HTTP
//! layer never needs to know which backend is active.

use crate::errors::AppResult;
use crate::models::{
    CostEntry, CostEntryInput, Ingredient, IngredientCreate, IngredientNutrient, Nutrient,
    NutrientCreate, Recipe, RecipeCreate,
};
use crate::pagination::PageParams;
use async_trait::async_trait;

/// Backend selection from the database URL
pub mod factory;
/// In-process store guarded by a single `RwLock`
pub mod memory;
/// `SQLite` store built on `sqlx`
pub mod sqlite;

/// Core database abstraction trait
///
/// All backends implement this trait to provide a consistent interface for
/// the route handlers.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Open a store for `database_url`, creating the schema when needed
    async fn new(database_url: &str) -> AppResult<Self>
    where
        Self: Sized;

    /// Create the schema if it does not exist yet
    async fn migrate(&self) -> AppResult<()>;

    /// Human readable backend description
    fn backend_info(&self) -> &'static str;

    // ================================
    // Recipes
    // ================================

    /// Create a recipe with its ingredients
    async fn create_recipe(&self, recipe: &RecipeCreate) -> AppResult<Recipe>;

    /// Get a recipe by id
    async fn get_recipe(&self, recipe_id: i64) -> AppResult<Recipe>;

    /// List recipes in id order
    async fn list_recipes(&self, page: PageParams) -> AppResult<Vec<Recipe>>;

    /// Replace a recipe's name and its entire ingredient list
    async fn update_recipe(&self, recipe_id: i64, recipe: &RecipeCreate) -> AppResult<Recipe>;

    /// Delete a recipe and everything it owns
    async fn delete_recipe(&self, recipe_id: i64) -> AppResult<()>;

    // ================================
    // Ingredients and cost history
    // ================================

    /// Add an ingredient to a recipe
    async fn create_ingredient(
        &self,
        recipe_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient>;

    /// Get an ingredient by id
    async fn get_ingredient(&self, ingredient_id: i64) -> AppResult<Ingredient>;

    /// List ingredients across all recipes in id order
    async fn list_ingredients(&self, page: PageParams) -> AppResult<Vec<Ingredient>>;

    /// Update an ingredient, appending to its cost history when the cost changes
    async fn update_ingredient(
        &self,
        ingredient_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient>;

    /// Delete an ingredient with its history and nutrient amounts
    async fn delete_ingredient(&self, ingredient_id: i64) -> AppResult<()>;

    /// Append one cost entry to an ingredient's history
    async fn add_cost_entry(
        &self,
        ingredient_id: i64,
        entry: &CostEntryInput,
    ) -> AppResult<Ingredient>;

    /// Cost history, newest first
    async fn get_cost_history(&self, ingredient_id: i64) -> AppResult<Vec<CostEntry>>;

    // ================================
    // Nutrient catalog
    // ================================

    /// Add a nutrient to the catalog
    async fn create_nutrient(&self, nutrient: &NutrientCreate) -> AppResult<Nutrient>;

    /// Get a nutrient by id
    async fn get_nutrient(&self, nutrient_id: i64) -> AppResult<Nutrient>;

    /// Get a nutrient by exact name
    async fn get_nutrient_by_name(&self, name: &str) -> AppResult<Nutrient>;

    /// List nutrients in id order
    async fn list_nutrients(&self, page: PageParams) -> AppResult<Vec<Nutrient>>;

    /// Delete a nutrient and its ingredient amounts
    async fn delete_nutrient(&self, nutrient_id: i64) -> AppResult<()>;

    /// Set the amount of a nutrient per 100 g of an ingredient
    async fn set_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
        amount: f64,
    ) -> AppResult<IngredientNutrient>;

    /// Nutrient amounts of an ingredient, ordered by nutrient id
    async fn list_ingredient_nutrients(
        &self,
        ingredient_id: i64,
    ) -> AppResult<Vec<IngredientNutrient>>;

    /// Remove one nutrient amount from an ingredient
    async fn remove_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
    ) -> AppResult<()>;
}
