// ABOUTME: HTTP tests for the recipe, ingredient and nutrient REST endpoints
// ABOUTME: Drives the full router in-process over both storage backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use anyhow::Result;
use axum::http::StatusCode;
use common::{create_test_router, BACKEND_URLS};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn chicken_salad_body() -> Value {
    json!({
        "name": "Chicken Salad",
        "ingredients": [{
            "name": "Chicken Breast",
            "weight": 150.0,
            "nutrition_facts": { "protein": 45.0 },
            "cost": 2.50
        }]
    })
}

#[tokio::test]
async fn test_chicken_salad_scenario() -> Result<()> {
    for url in BACKEND_URLS {
        let app = create_test_router(url).await?;

        let recipe: Value = AxumTestRequest::post("/recipes")
            .json(&chicken_salad_body())
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED)
            .json();
        assert_eq!(recipe["id"], 1, "{url}");
        assert_eq!(recipe["ingredients"].as_array().unwrap().len(), 1);
        let ingredient = &recipe["ingredients"][0];
        assert_eq!(ingredient["cost"], 2.5);
        assert_eq!(ingredient["cost_entries"].as_array().unwrap().len(), 1);
        assert_eq!(ingredient["cost_entries"][0]["notes"], "Initial cost");
        let ingredient_id = ingredient["id"].as_i64().unwrap();

        let updated: Value = AxumTestRequest::post(&format!("/ingredients/{ingredient_id}/cost"))
            .json(&json!({ "cost": 2.75, "vendor": "Costco" }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(updated["cost"], 2.75, "{url}");

        let history: Value =
            AxumTestRequest::get(&format!("/ingredients/{ingredient_id}/cost_history"))
                .send(app.clone())
                .await
                .assert_status(StatusCode::OK)
                .json();
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 2, "{url}");
        assert_eq!(history[0]["cost"], 2.75);
        assert_eq!(history[0]["vendor"], "Costco");
        assert_eq!(history[1]["cost"], 2.5);
    }
    Ok(())
}

#[tokio::test]
async fn test_recipe_crud_over_http() -> Result<()> {
    for url in BACKEND_URLS {
        let app = create_test_router(url).await?;

        let empty: Value = AxumTestRequest::get("/recipes")
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(empty, json!([]), "{url}");

        AxumTestRequest::post("/recipes")
            .json(&chicken_salad_body())
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED);
        AxumTestRequest::post("/recipes")
            .json(&json!({ "name": "Plain Toast" }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED);

        let page: Value = AxumTestRequest::get("/recipes?skip=1&limit=10")
            .send(app.clone())
            .await
            .json();
        assert_eq!(page.as_array().unwrap().len(), 1);
        assert_eq!(page[0]["name"], "Plain Toast", "{url}");
        assert_eq!(page[0]["ingredients"], json!([]));

        let replaced: Value = AxumTestRequest::put("/recipes/1")
            .json(&json!({
                "name": "Chicken Wrap",
                "ingredients": [{
                    "name": "Tortilla",
                    "weight": 60.0,
                    "nutrition_facts": {},
                    "cost": 0.30
                }]
            }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(replaced["name"], "Chicken Wrap");
        assert_eq!(replaced["ingredients"][0]["name"], "Tortilla", "{url}");

        AxumTestRequest::delete("/recipes/1")
            .send(app.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let missing: Value = AxumTestRequest::get("/recipes/1")
            .send(app.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND)
            .json();
        assert_eq!(missing["error"]["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(missing["error"]["message"], "Recipe 1 not found", "{url}");
    }
    Ok(())
}

#[tokio::test]
async fn test_ingredient_endpoints() -> Result<()> {
    for url in BACKEND_URLS {
        let app = create_test_router(url).await?;
        AxumTestRequest::post("/recipes")
            .json(&json!({ "name": "Rice Bowl" }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED);

        let rice: Value = AxumTestRequest::post("/ingredients/1")
            .json(&json!({
                "name": "Rice",
                "weight": 200.0,
                "nutrition_facts": { "carbohydrates": 56.0 },
                "cost": 1.20
            }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED)
            .json();
        assert_eq!(rice["recipe_id"], 1, "{url}");
        let rice_id = rice["id"].as_i64().unwrap();

        let same_cost: Value = AxumTestRequest::put(&format!("/ingredients/{rice_id}"))
            .json(&json!({
                "name": "Rice",
                "weight": 220.0,
                "nutrition_facts": { "carbohydrates": 60.0 },
                "cost": 1.20
            }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(same_cost["cost_entries"].as_array().unwrap().len(), 1);
        assert_eq!(same_cost["weight"], 220.0, "{url}");

        let new_cost: Value = AxumTestRequest::put(&format!("/ingredients/{rice_id}"))
            .json(&json!({
                "name": "Rice",
                "weight": 220.0,
                "nutrition_facts": {},
                "cost": 1.50
            }))
            .send(app.clone())
            .await
            .json();
        assert_eq!(new_cost["cost_entries"].as_array().unwrap().len(), 2);
        assert_eq!(new_cost["cost_entries"][1]["notes"], "Updated cost");
        assert_eq!(new_cost["cost"], 1.5, "{url}");

        let listed: Value = AxumTestRequest::get("/ingredients")
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        AxumTestRequest::delete(&format!("/ingredients/{rice_id}"))
            .send(app.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);
        AxumTestRequest::get(&format!("/ingredients/{rice_id}/cost_history"))
            .send(app.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn test_ingredient_for_missing_recipe_is_not_found() -> Result<()> {
    for url in BACKEND_URLS {
        let app = create_test_router(url).await?;
        let body: Value = AxumTestRequest::post("/ingredients/42")
            .json(&json!({
                "name": "Ghost Pepper",
                "weight": 5.0,
                "nutrition_facts": {},
                "cost": 0.10
            }))
            .send(app)
            .await
            .assert_status(StatusCode::NOT_FOUND)
            .json();
        assert_eq!(body["error"]["message"], "Recipe 42 not found", "{url}");
    }
    Ok(())
}

#[tokio::test]
async fn test_validation_failures_return_422() -> Result<()> {
    for url in BACKEND_URLS {
        let app = create_test_router(url).await?;

        let body: Value = AxumTestRequest::post("/recipes")
            .json(&json!({
                "name": "Weightless",
                "ingredients": [{
                    "name": "Air",
                    "weight": 0.0,
                    "nutrition_facts": {},
                    "cost": 0.0
                }]
            }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
            .json();
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED", "{url}");
        assert_eq!(body["error"]["details"]["field"], "ingredients[0].weight");

        // Nothing was written
        let recipes: Value = AxumTestRequest::get("/recipes").send(app.clone()).await.json();
        assert_eq!(recipes, json!([]), "{url}");
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_payloads_are_rejected() -> Result<()> {
    let app = create_test_router("memory://").await?;

    let response = AxumTestRequest::post("/recipes")
        .raw_json("{\"name\": ")
        .send(app.clone())
        .await;
    assert!(response.status_code().is_client_error());

    let response = AxumTestRequest::get("/recipes/not-a-number")
        .send(app)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_nutrient_endpoints() -> Result<()> {
    for url in BACKEND_URLS {
        let app = create_test_router(url).await?;
        AxumTestRequest::post("/recipes")
            .json(&chicken_salad_body())
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED);

        let protein: Value = AxumTestRequest::post("/nutrients")
            .json(&json!({ "name": "Protein", "unit": "g" }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::CREATED)
            .json();
        let protein_id = protein["id"].as_i64().unwrap();

        let conflict: Value = AxumTestRequest::post("/nutrients")
            .json(&json!({ "name": "Protein", "unit": "mg" }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::CONFLICT)
            .json();
        assert_eq!(conflict["error"]["code"], "RESOURCE_ALREADY_EXISTS", "{url}");

        let by_name: Value = AxumTestRequest::get("/nutrients/by-name/Protein")
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(by_name, protein);

        let link: Value = AxumTestRequest::put(&format!("/ingredients/1/nutrients/{protein_id}"))
            .json(&json!({ "amount": 31.0 }))
            .send(app.clone())
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(link["nutrient_name"], "Protein", "{url}");
        assert_eq!(link["amount"], 31.0);

        let amounts: Value = AxumTestRequest::get("/ingredients/1/nutrients")
            .send(app.clone())
            .await
            .json();
        assert_eq!(amounts.as_array().unwrap().len(), 1);

        AxumTestRequest::delete(&format!("/nutrients/{protein_id}"))
            .send(app.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let amounts: Value = AxumTestRequest::get("/ingredients/1/nutrients")
            .send(app.clone())
            .await
            .json();
        assert_eq!(amounts, json!([]), "{url}");

        AxumTestRequest::delete(&format!("/ingredients/1/nutrients/{protein_id}"))
            .send(app.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);
        AxumTestRequest::get(&format!("/nutrients/{protein_id}"))
            .send(app.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
    Ok(())
}
