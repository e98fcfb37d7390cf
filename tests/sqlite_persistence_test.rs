// ABOUTME: Tests for on-disk SQLite databases surviving a reopen
// ABOUTME: Verifies schema reuse, id continuity and that parent directories are created
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{chicken_salad, create_test_database};
use nutricost_server::{
    database_plugins::{factory::DatabaseType, DatabaseProvider},
    models::{CostEntryInput, IngredientCreate, NutrientCreate, RecipeCreate},
};
use tempfile::TempDir;

#[tokio::test]
async fn test_data_survives_reopen() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let url = format!("sqlite:{}", temp_dir.path().join("nutricost.db").display());

    let (recipe_id, chicken_id) = {
        let db = create_test_database(&url).await?;
        assert_eq!(db.database_type(), DatabaseType::SQLite);

        let recipe = db.create_recipe(&chicken_salad()).await?;
        let chicken_id = recipe.ingredients[0].id;
        db.add_cost_entry(chicken_id, &CostEntryInput::new(2.75))
            .await?;
        let protein = db
            .create_nutrient(&NutrientCreate::new("Protein", "g"))
            .await?;
        db.set_ingredient_nutrient(chicken_id, protein.id, 31.0)
            .await?;
        (recipe.id, chicken_id)
    };

    // Reopening runs the idempotent schema again
    let db = create_test_database(&url).await?;
    let recipe = db.get_recipe(recipe_id).await?;
    assert_eq!(recipe.name, "Chicken Salad");

    let history = db.get_cost_history(chicken_id).await?;
    assert_eq!(history.len(), 2);
    assert!((history[0].cost - 2.75).abs() < f64::EPSILON);

    let amounts = db.list_ingredient_nutrients(chicken_id).await?;
    assert_eq!(amounts.len(), 1);
    assert_eq!(amounts[0].nutrient_name, "Protein");

    let next = db.create_recipe(&RecipeCreate::new("Second")).await?;
    assert!(next.id > recipe_id);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cost_writes_on_file_database() -> Result<()> {
    const WRITERS: usize = 40;

    let temp_dir = TempDir::new()?;
    let url = format!("sqlite:{}", temp_dir.path().join("busy.db").display());
    let db = create_test_database(&url).await?;
    let recipe = db.create_recipe(&chicken_salad()).await?;
    let chicken_id = recipe.ingredients[0].id;

    let mut handles = Vec::with_capacity(WRITERS);
    for writer in 0..WRITERS {
        let db = db.clone();
        // Distinct costs so every update appends an entry
        #[allow(clippy::cast_precision_loss)]
        let cost = 3.0 + writer as f64 / 100.0;
        handles.push(tokio::spawn(async move {
            if writer % 2 == 0 {
                db.add_cost_entry(chicken_id, &CostEntryInput::new(cost))
                    .await
                    .map(|_| ())
            } else {
                db.update_ingredient(chicken_id, &IngredientCreate::new("Chicken Breast", 150.0, cost))
                    .await
                    .map(|_| ())
            }
        }));
    }

    let mut failures = Vec::new();
    for handle in handles {
        if let Err(e) = handle.await? {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "writers failed: {failures:?}");

    let history = db.get_cost_history(chicken_id).await?;
    assert_eq!(history.len(), WRITERS + 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_parent_directory_is_created() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("nested").join("deeper").join("app.db");
    let url = format!("sqlite:{}", path.display());

    let db = create_test_database(&url).await?;
    db.create_recipe(&RecipeCreate::new("Toast")).await?;

    assert!(path.exists());
    Ok(())
}

#[tokio::test]
async fn test_separate_memory_databases_are_isolated() -> Result<()> {
    for url in ["sqlite::memory:", "memory://"] {
        let first = create_test_database(url).await?;
        let second = create_test_database(url).await?;

        first.create_recipe(&chicken_salad()).await?;
        assert!(second
            .list_recipes(nutricost_server::pagination::PageParams::default())
            .await?
            .is_empty());
    }
    Ok(())
}
