// ABOUTME: Database operations for ingredients and their append-only cost histories
// ABOUTME: Cost entries are inserted in append order and only sorted when read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use super::{format_timestamp, parse_timestamp, recipes::recipe_exists};
use crate::errors::{AppError, AppResult};
use crate::models::{
    CostEntry, CostEntryInput, CostHistory, Ingredient, IngredientCreate, NutritionFacts,
};
use crate::pagination::PageParams;
use crate::validation::Validate;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// Ingredient database operations manager
pub struct IngredientsManager {
    pool: SqlitePool,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add an ingredient to an existing recipe
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the recipe does not exist or the
    /// database operation fails
    pub async fn create(
        &self,
        recipe_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        ingredient.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !recipe_exists(&mut tx, recipe_id).await? {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        let history = ingredient.initial_history(Utc::now());
        let created = insert_ingredient(&mut tx, recipe_id, ingredient, history).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to create ingredient: {e}")))?;

        info!(
            ingredient.id = created.id,
            recipe.id = recipe_id,
            cost = created.current_cost(),
            "Ingredient created"
        );
        Ok(created)
    }

    /// Get an ingredient with its full cost history
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the ingredient does not exist
    pub async fn get(&self, ingredient_id: i64) -> AppResult<Ingredient> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let ingredient = fetch_ingredient(&mut tx, ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;
        Ok(ingredient)
    }

    /// List ingredients across all recipes in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, page: PageParams) -> AppResult<Vec<Ingredient>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let rows = sqlx::query(
            r"
            SELECT id, recipe_id, name, weight, nutrition_facts
            FROM ingredients
            ORDER BY id
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        let mut ingredients = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: i64 = row.get("id");
            let history = fetch_cost_history(&mut tx, id).await?;
            ingredients.push(row_to_ingredient(row, history)?);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;
        Ok(ingredients)
    }

    /// Replace name, weight and nutrition facts, appending to the cost history
    ///
    /// An "Updated cost" entry is appended only when the submitted cost differs
    /// from the current cost. Explicit `cost_entries` are appended afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the ingredient does not exist or
    /// the database operation fails
    pub async fn update(
        &self,
        ingredient_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        ingredient.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let existing = fetch_ingredient(&mut tx, ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        let facts_json = serde_json::to_string(&ingredient.nutrition_facts)?;
        sqlx::query(
            r"
            UPDATE ingredients
            SET name = $1, weight = $2, nutrition_facts = $3
            WHERE id = $4
            ",
        )
        .bind(&ingredient.name)
        .bind(ingredient.weight)
        .bind(&facts_json)
        .bind(ingredient_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update ingredient: {e}")))?;

        let appended = ingredient.update_entries(&existing.cost_entries, Utc::now());
        for entry in &appended {
            insert_cost_entry(&mut tx, ingredient_id, entry).await?;
        }

        let updated = fetch_ingredient(&mut tx, ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to update ingredient: {e}")))?;

        info!(
            ingredient.id = ingredient_id,
            entries_appended = appended.len(),
            cost = updated.current_cost(),
            "Ingredient updated"
        );
        Ok(updated)
    }

    /// Delete an ingredient, its cost history and its nutrient amounts
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the ingredient does not exist
    pub async fn delete(&self, ingredient_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(ingredient_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete ingredient: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }

        info!(ingredient.id = ingredient_id, "Ingredient deleted");
        Ok(())
    }

    /// Append a cost entry verbatim, dated now when no date is given
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the ingredient does not exist or
    /// the database operation fails
    pub async fn add_cost_entry(
        &self,
        ingredient_id: i64,
        entry: &CostEntryInput,
    ) -> AppResult<Ingredient> {
        entry.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !ingredient_exists(&mut tx, ingredient_id).await? {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }

        let stored = entry.clone().into_entry(Utc::now());
        insert_cost_entry(&mut tx, ingredient_id, &stored).await?;

        let updated = fetch_ingredient(&mut tx, ingredient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to add cost entry: {e}")))?;

        info!(
            ingredient.id = ingredient_id,
            cost = stored.cost,
            vendor = stored.vendor.as_deref().unwrap_or(""),
            "Cost entry recorded"
        );
        Ok(updated)
    }

    /// Full cost history, newest first
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the ingredient does not exist
    pub async fn cost_history(&self, ingredient_id: i64) -> AppResult<Vec<CostEntry>> {
        let ingredient = self.get(ingredient_id).await?;
        Ok(ingredient.cost_entries.history_sorted_desc())
    }
}

/// Whether an ingredient row exists
pub(crate) async fn ingredient_exists(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
) -> AppResult<bool> {
    let row = sqlx::query("SELECT 1 FROM ingredients WHERE id = $1")
        .bind(ingredient_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up ingredient: {e}")))?;
    Ok(row.is_some())
}

/// Insert an ingredient together with its seeded cost history
pub(crate) async fn insert_ingredient(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    ingredient: &IngredientCreate,
    history: CostHistory,
) -> AppResult<Ingredient> {
    let facts_json = serde_json::to_string(&ingredient.nutrition_facts)?;

    let result = sqlx::query(
        r"
        INSERT INTO ingredients (recipe_id, name, weight, nutrition_facts)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(recipe_id)
    .bind(&ingredient.name)
    .bind(ingredient.weight)
    .bind(&facts_json)
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to create ingredient: {e}")))?;

    let id = result.last_insert_rowid();
    for entry in history.entries() {
        insert_cost_entry(conn, id, entry).await?;
    }

    Ok(Ingredient {
        id,
        name: ingredient.name.clone(),
        weight: ingredient.weight,
        nutrition_facts: ingredient.nutrition_facts.clone(),
        recipe_id,
        cost_entries: history,
    })
}

/// Load one ingredient with its history
pub(crate) async fn fetch_ingredient(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
) -> AppResult<Option<Ingredient>> {
    let row = sqlx::query(
        r"
        SELECT id, recipe_id, name, weight, nutrition_facts
        FROM ingredients
        WHERE id = $1
        ",
    )
    .bind(ingredient_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to get ingredient: {e}")))?;

    match row {
        Some(row) => {
            let history = fetch_cost_history(conn, ingredient_id).await?;
            row_to_ingredient(&row, history).map(Some)
        }
        None => Ok(None),
    }
}

/// Load every ingredient of a recipe in insertion order
pub(crate) async fn fetch_recipe_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: i64,
) -> AppResult<Vec<Ingredient>> {
    let rows = sqlx::query(
        r"
        SELECT id, recipe_id, name, weight, nutrition_facts
        FROM ingredients
        WHERE recipe_id = $1
        ORDER BY id
        ",
    )
    .bind(recipe_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

    let mut ingredients = Vec::with_capacity(rows.len());
    for row in &rows {
        let id: i64 = row.get("id");
        let history = fetch_cost_history(conn, id).await?;
        ingredients.push(row_to_ingredient(row, history)?);
    }
    Ok(ingredients)
}

async fn fetch_cost_history(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
) -> AppResult<CostHistory> {
    let rows = sqlx::query(
        r"
        SELECT cost, date, vendor, notes
        FROM cost_entries
        WHERE ingredient_id = $1
        ORDER BY id
        ",
    )
    .bind(ingredient_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to load cost history: {e}")))?;

    rows.iter()
        .map(|row| {
            let date: String = row.get("date");
            Ok(CostEntry {
                cost: row.get("cost"),
                date: parse_timestamp(&date)?,
                vendor: row.get("vendor"),
                notes: row.get("notes"),
            })
        })
        .collect::<AppResult<Vec<_>>>()
        .map(CostHistory::from_entries)
}

async fn insert_cost_entry(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
    entry: &CostEntry,
) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO cost_entries (ingredient_id, cost, date, vendor, notes)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(ingredient_id)
    .bind(entry.cost)
    .bind(format_timestamp(entry.date))
    .bind(&entry.vendor)
    .bind(&entry.notes)
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to record cost entry: {e}")))?;

    debug!(ingredient.id = ingredient_id, cost = entry.cost, "Cost entry appended");
    Ok(())
}

fn row_to_ingredient(row: &SqliteRow, cost_entries: CostHistory) -> AppResult<Ingredient> {
    let facts_json: String = row.get("nutrition_facts");
    let nutrition_facts: NutritionFacts = serde_json::from_str(&facts_json)?;

    Ok(Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        weight: row.get("weight"),
        nutrition_facts,
        recipe_id: row.get("recipe_id"),
        cost_entries,
    })
}
