// ABOUTME: Database operations for the nutrient catalog and per-ingredient nutrient amounts
// ABOUTME: Nutrient names are unique; amounts are upserted per (ingredient, nutrient) pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use super::ingredients::ingredient_exists;
use crate::errors::{AppError, AppResult};
use crate::models::{IngredientNutrient, Nutrient, NutrientAmount, NutrientCreate};
use crate::pagination::PageParams;
use crate::validation::Validate;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::info;

/// Nutrient catalog database operations manager
pub struct NutrientsManager {
    pool: SqlitePool,
}

impl NutrientsManager {
    /// Create a new nutrients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a nutrient to the catalog
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the name is taken, or an error if
    /// validation or the database operation fails
    pub async fn create(&self, nutrient: &NutrientCreate) -> AppResult<Nutrient> {
        nutrient.validate()?;

        let result = sqlx::query("INSERT INTO nutrients (name, unit) VALUES ($1, $2)")
            .bind(&nutrient.name)
            .bind(&nutrient.unit)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    AppError::already_exists(format!("Nutrient '{}'", nutrient.name))
                }
                _ => AppError::database(format!("Failed to create nutrient: {e}")),
            })?;

        let created = Nutrient {
            id: result.last_insert_rowid(),
            name: nutrient.name.clone(),
            unit: nutrient.unit.clone(),
        };
        info!(nutrient.id = created.id, nutrient.name = %created.name, "Nutrient created");
        Ok(created)
    }

    /// Get a nutrient by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the nutrient does not exist
    pub async fn get(&self, nutrient_id: i64) -> AppResult<Nutrient> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        fetch_nutrient(&mut conn, nutrient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Nutrient {nutrient_id}")))
    }

    /// Get a nutrient by its exact name
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no nutrient has that name
    pub async fn get_by_name(&self, name: &str) -> AppResult<Nutrient> {
        let row = sqlx::query("SELECT id, name, unit FROM nutrients WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get nutrient: {e}")))?;

        row.as_ref()
            .map(row_to_nutrient)
            .ok_or_else(|| AppError::not_found(format!("Nutrient '{name}'")))
    }

    /// List the catalog in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self, page: PageParams) -> AppResult<Vec<Nutrient>> {
        let rows = sqlx::query("SELECT id, name, unit FROM nutrients ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.limit())
            .bind(page.skip())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list nutrients: {e}")))?;

        Ok(rows.iter().map(row_to_nutrient).collect())
    }

    /// Delete a nutrient and every ingredient amount referencing it
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the nutrient does not exist
    pub async fn delete(&self, nutrient_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM nutrients WHERE id = $1")
            .bind(nutrient_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete nutrient: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Nutrient {nutrient_id}")));
        }

        info!(nutrient.id = nutrient_id, "Nutrient deleted");
        Ok(())
    }

    /// Set the amount of a nutrient per 100 g of an ingredient
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the ingredient or nutrient does not exist
    pub async fn set_ingredient_amount(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
        amount: f64,
    ) -> AppResult<IngredientNutrient> {
        NutrientAmount { amount }.validate()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !ingredient_exists(&mut tx, ingredient_id).await? {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }
        let nutrient = fetch_nutrient(&mut tx, nutrient_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Nutrient {nutrient_id}")))?;

        sqlx::query(
            r"
            INSERT INTO ingredient_nutrients (ingredient_id, nutrient_id, amount)
            VALUES ($1, $2, $3)
            ON CONFLICT(ingredient_id, nutrient_id) DO UPDATE SET amount = excluded.amount
            ",
        )
        .bind(ingredient_id)
        .bind(nutrient_id)
        .bind(amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to set nutrient amount: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to set nutrient amount: {e}")))?;

        Ok(IngredientNutrient {
            ingredient_id,
            nutrient_id,
            nutrient_name: nutrient.name,
            unit: nutrient.unit,
            amount,
        })
    }

    /// Nutrient amounts of an ingredient, ordered by nutrient id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the ingredient does not exist
    pub async fn list_ingredient_amounts(
        &self,
        ingredient_id: i64,
    ) -> AppResult<Vec<IngredientNutrient>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        if !ingredient_exists(&mut tx, ingredient_id).await? {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }

        let rows = sqlx::query(
            r"
            SELECT inn.ingredient_id, inn.nutrient_id, n.name, n.unit, inn.amount
            FROM ingredient_nutrients inn
            JOIN nutrients n ON n.id = inn.nutrient_id
            WHERE inn.ingredient_id = $1
            ORDER BY n.id
            ",
        )
        .bind(ingredient_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to list nutrient amounts: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to list nutrient amounts: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| IngredientNutrient {
                ingredient_id: row.get("ingredient_id"),
                nutrient_id: row.get("nutrient_id"),
                nutrient_name: row.get("name"),
                unit: row.get("unit"),
                amount: row.get("amount"),
            })
            .collect())
    }

    /// Remove a nutrient amount from an ingredient
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the link does not exist
    pub async fn remove_ingredient_amount(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM ingredient_nutrients WHERE ingredient_id = $1 AND nutrient_id = $2",
        )
        .bind(ingredient_id)
        .bind(nutrient_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to remove nutrient amount: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Nutrient {nutrient_id} on ingredient {ingredient_id}"
            )));
        }
        Ok(())
    }
}

async fn fetch_nutrient(conn: &mut SqliteConnection, nutrient_id: i64) -> AppResult<Option<Nutrient>> {
    let row = sqlx::query("SELECT id, name, unit FROM nutrients WHERE id = $1")
        .bind(nutrient_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get nutrient: {e}")))?;

    Ok(row.as_ref().map(row_to_nutrient))
}

fn row_to_nutrient(row: &SqliteRow) -> Nutrient {
    Nutrient {
        id: row.get("id"),
        name: row.get("name"),
        unit: row.get("unit"),
    }
}
