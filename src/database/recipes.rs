// ABOUTME: Database operations for recipes and the ingredients they own
// ABOUTME: Updates fully replace the ingredient list; deletes cascade through foreign keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use super::ingredients::{fetch_recipe_ingredients, insert_ingredient};
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, RecipeCreate};
use crate::pagination::PageParams;
use crate::validation::Validate;
use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::info;

/// Recipe database operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a recipe and its ingredients in input order
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the database operation fails.
    /// Nothing is written when any ingredient is invalid.
    pub async fn create(&self, recipe: &RecipeCreate) -> AppResult<Recipe> {
        recipe.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let result = sqlx::query("INSERT INTO recipes (name) VALUES ($1)")
            .bind(&recipe.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;
        let id = result.last_insert_rowid();

        let now = Utc::now();
        let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
        for ingredient in &recipe.ingredients {
            let history = ingredient.initial_history(now);
            ingredients.push(insert_ingredient(&mut tx, id, ingredient, history).await?);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to create recipe: {e}")))?;

        info!(
            recipe.id = id,
            ingredients = ingredients.len(),
            "Recipe created"
        );
        Ok(Recipe {
            id,
            name: recipe.name.clone(),
            ingredients,
        })
    }

    /// Get a recipe with all ingredients and their histories
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist
    pub async fn get(&self, recipe_id: i64) -> AppResult<Recipe> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let recipe = fetch_recipe(&mut tx, recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;
        Ok(recipe)
    }

    /// List recipes in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, page: PageParams) -> AppResult<Vec<Recipe>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let rows = sqlx::query("SELECT id, name FROM recipes ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.limit())
            .bind(page.skip())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        let mut recipes = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.get("id");
            recipes.push(Recipe {
                id,
                name: row.get("name"),
                ingredients: fetch_recipe_ingredients(&mut tx, id).await?,
            });
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;
        Ok(recipes)
    }

    /// Replace the name and the whole ingredient list.
    ///
    /// Existing ingredients are deleted together with their cost histories and
    /// nutrient amounts, then recreated from the payload with fresh ids and an
    /// "Updated cost" first entry.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the recipe does not exist or the
    /// database operation fails
    pub async fn update(&self, recipe_id: i64, recipe: &RecipeCreate) -> AppResult<Recipe> {
        recipe.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let result = sqlx::query("UPDATE recipes SET name = $1 WHERE id = $2")
            .bind(&recipe.name)
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        let removed = sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to replace ingredients: {e}")))?
            .rows_affected();

        let now = Utc::now();
        let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
        for ingredient in &recipe.ingredients {
            let history = ingredient.replacement_history(now);
            ingredients.push(insert_ingredient(&mut tx, recipe_id, ingredient, history).await?);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        info!(
            recipe.id = recipe_id,
            ingredients_removed = removed,
            ingredients_created = ingredients.len(),
            "Recipe replaced"
        );
        Ok(Recipe {
            id: recipe_id,
            name: recipe.name.clone(),
            ingredients,
        })
    }

    /// Delete a recipe; ingredients, histories and nutrient amounts cascade
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist
    pub async fn delete(&self, recipe_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }

        info!(recipe.id = recipe_id, "Recipe deleted");
        Ok(())
    }
}

/// Whether a recipe row exists
pub(crate) async fn recipe_exists(conn: &mut SqliteConnection, recipe_id: i64) -> AppResult<bool> {
    let row = sqlx::query("SELECT 1 FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up recipe: {e}")))?;
    Ok(row.is_some())
}

async fn fetch_recipe(conn: &mut SqliteConnection, recipe_id: i64) -> AppResult<Option<Recipe>> {
    let row = sqlx::query("SELECT id, name FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

    let Some(row) = row else {
        return Ok(None);
    };
    Ok(Some(Recipe {
        id: row.get("id"),
        name: row.get("name"),
        ingredients: fetch_recipe_ingredients(conn, recipe_id).await?,
    }))
}
