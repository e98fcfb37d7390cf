// ABOUTME: Behavioural tests for the nutrient catalog and per-ingredient nutrient amounts
// ABOUTME: Covers unique names, upserts, ordering and cascading removal on both backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{all_test_databases, chicken_salad};
use nutricost_server::{
    database_plugins::DatabaseProvider, errors::ErrorCode, models::NutrientCreate,
    pagination::PageParams,
};

#[tokio::test]
async fn test_create_and_lookup_nutrients() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        let protein = db
            .create_nutrient(&NutrientCreate::new("Protein", "g"))
            .await?;
        let sodium = db
            .create_nutrient(&NutrientCreate::new("Sodium", "mg"))
            .await?;

        assert!(sodium.id > protein.id, "{url}");
        assert_eq!(db.get_nutrient(protein.id).await?, protein);
        assert_eq!(db.get_nutrient_by_name("Sodium").await?, sodium, "{url}");

        let listed = db.list_nutrients(PageParams::default()).await?;
        assert_eq!(listed, vec![protein.clone(), sodium]);

        let page = db.list_nutrients(PageParams::new(0, 1)).await?;
        assert_eq!(page, vec![protein], "{url}");
    }
    Ok(())
}

#[tokio::test]
async fn test_duplicate_nutrient_name_conflicts() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        db.create_nutrient(&NutrientCreate::new("Fiber", "g"))
            .await?;
        let err = db
            .create_nutrient(&NutrientCreate::new("Fiber", "mg"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ResourceAlreadyExists, "{url}");
        assert_eq!(err.http_status(), 409);
        assert_eq!(db.list_nutrients(PageParams::default()).await?.len(), 1);
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_nutrient_lookups() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        let err = db.get_nutrient(5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound, "{url}");

        let err = db.get_nutrient_by_name("Vitamin Q").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);

        let err = db.delete_nutrient(5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound, "{url}");
    }
    Ok(())
}

#[tokio::test]
async fn test_set_ingredient_nutrient_upserts() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        let recipe = db.create_recipe(&chicken_salad()).await?;
        let chicken_id = recipe.ingredients[0].id;
        let sodium = db
            .create_nutrient(&NutrientCreate::new("Sodium", "mg"))
            .await?;
        let protein = db
            .create_nutrient(&NutrientCreate::new("Protein", "g"))
            .await?;

        // Inserted out of nutrient id order
        db.set_ingredient_nutrient(chicken_id, protein.id, 30.0)
            .await?;
        let link = db
            .set_ingredient_nutrient(chicken_id, sodium.id, 70.0)
            .await?;
        assert_eq!(link.nutrient_name, "Sodium");
        assert_eq!(link.unit, "mg");

        let replaced = db
            .set_ingredient_nutrient(chicken_id, protein.id, 31.0)
            .await?;
        assert!((replaced.amount - 31.0).abs() < f64::EPSILON, "{url}");

        let amounts = db.list_ingredient_nutrients(chicken_id).await?;
        let listed: Vec<(&str, f64)> = amounts
            .iter()
            .map(|a| (a.nutrient_name.as_str(), a.amount))
            .collect();
        assert_eq!(listed, vec![("Sodium", 70.0), ("Protein", 31.0)], "{url}");
    }
    Ok(())
}

#[tokio::test]
async fn test_set_ingredient_nutrient_requires_both_records() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        let recipe = db.create_recipe(&chicken_salad()).await?;
        let chicken_id = recipe.ingredients[0].id;
        let iron = db
            .create_nutrient(&NutrientCreate::new("Iron", "mg"))
            .await?;

        let err = db
            .set_ingredient_nutrient(999, iron.id, 1.0)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Ingredient 999 not found", "{url}");

        let err = db
            .set_ingredient_nutrient(chicken_id, 999, 1.0)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Nutrient 999 not found", "{url}");

        let err = db
            .set_ingredient_nutrient(chicken_id, iron.id, -0.5)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = db.list_ingredient_nutrients(999).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound, "{url}");
    }
    Ok(())
}

#[tokio::test]
async fn test_remove_ingredient_nutrient() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        let recipe = db.create_recipe(&chicken_salad()).await?;
        let chicken_id = recipe.ingredients[0].id;
        let iron = db
            .create_nutrient(&NutrientCreate::new("Iron", "mg"))
            .await?;
        db.set_ingredient_nutrient(chicken_id, iron.id, 1.1).await?;

        db.remove_ingredient_nutrient(chicken_id, iron.id).await?;
        assert!(db.list_ingredient_nutrients(chicken_id).await?.is_empty());

        let err = db
            .remove_ingredient_nutrient(chicken_id, iron.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound, "{url}");
        // The nutrient itself stays in the catalog
        assert_eq!(db.get_nutrient(iron.id).await?, iron);
    }
    Ok(())
}

#[tokio::test]
async fn test_delete_nutrient_removes_links() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        let recipe = db.create_recipe(&chicken_salad()).await?;
        let chicken_id = recipe.ingredients[0].id;
        let iron = db
            .create_nutrient(&NutrientCreate::new("Iron", "mg"))
            .await?;
        let zinc = db
            .create_nutrient(&NutrientCreate::new("Zinc", "mg"))
            .await?;
        db.set_ingredient_nutrient(chicken_id, iron.id, 1.1).await?;
        db.set_ingredient_nutrient(chicken_id, zinc.id, 0.9).await?;

        db.delete_nutrient(iron.id).await?;

        let amounts = db.list_ingredient_nutrients(chicken_id).await?;
        assert_eq!(amounts.len(), 1, "{url}");
        assert_eq!(amounts[0].nutrient_id, zinc.id);
    }
    Ok(())
}

#[tokio::test]
async fn test_delete_ingredient_removes_links() -> Result<()> {
    for (url, db) in all_test_databases().await? {
        let recipe = db.create_recipe(&chicken_salad()).await?;
        let chicken_id = recipe.ingredients[0].id;
        let iron = db
            .create_nutrient(&NutrientCreate::new("Iron", "mg"))
            .await?;
        db.set_ingredient_nutrient(chicken_id, iron.id, 1.1).await?;

        db.delete_ingredient(chicken_id).await?;

        let err = db
            .remove_ingredient_nutrient(chicken_id, iron.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound, "{url}");
    }
    Ok(())
}
