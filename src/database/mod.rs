// ABOUTME: SQLite schema management and table managers for recipes, ingredients and nutrients
// ABOUTME: Managers wrap a SqlitePool and run composite operations inside one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! # Database Management
//!
//! Schema creation plus one manager per aggregate. Ids come from
//! `INTEGER PRIMARY KEY AUTOINCREMENT`, so a deleted id is never handed out
//! again. Child rows are removed through `ON DELETE CASCADE`, which requires
//! the `foreign_keys` pragma set on every connection.

/// Ingredient and cost history operations
pub mod ingredients;
/// Nutrient catalog operations
pub mod nutrients;
/// Recipe operations
pub mod recipes;

pub use ingredients::IngredientsManager;
pub use nutrients::NutrientsManager;
pub use recipes::RecipesManager;

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use tracing::debug;

/// Schema statements, applied in order
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS recipes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS ingredients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        weight REAL NOT NULL CHECK (weight > 0),
        nutrition_facts TEXT NOT NULL DEFAULT '{}'
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_ingredients_recipe_id ON ingredients(recipe_id)",
    r"
    CREATE TABLE IF NOT EXISTS cost_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
        cost REAL NOT NULL CHECK (cost >= 0),
        date TEXT NOT NULL,
        vendor TEXT,
        notes TEXT
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_cost_entries_ingredient_id ON cost_entries(ingredient_id)",
    r"
    CREATE TABLE IF NOT EXISTS nutrients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        unit TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS ingredient_nutrients (
        ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
        nutrient_id INTEGER NOT NULL REFERENCES nutrients(id) ON DELETE CASCADE,
        amount REAL NOT NULL CHECK (amount >= 0),
        PRIMARY KEY (ingredient_id, nutrient_id)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_ingredient_nutrients_nutrient_id ON ingredient_nutrients(nutrient_id)",
];

/// Create all tables and indexes if they do not exist yet
///
/// # Errors
///
/// Returns an error if a schema statement fails
pub async fn migrate(pool: &SqlitePool) -> AppResult<()> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin migration: {e}")))?;

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit migration: {e}")))?;

    debug!(statements = SCHEMA.len(), "SQLite schema up to date");
    Ok(())
}

/// Timestamps are stored as RFC 3339 text with full sub-second precision
pub(crate) fn format_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid stored timestamp '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_round_trip_keeps_precision() {
        let date = Utc.timestamp_nanos(1_717_236_000_123_456_789);
        let stored = format_timestamp(date);
        assert!(stored.ends_with('Z'));
        assert_eq!(parse_timestamp(&stored).unwrap(), date);
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
