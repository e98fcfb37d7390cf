// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides test logging, database constructors for both backends and a ready router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutricost_server`

use anyhow::Result;
use axum::Router;
use nutricost_server::{
    config::environment::{DatabaseUrl, ServerConfig},
    database_plugins::factory::Database,
    models::{IngredientCreate, RecipeCreate},
    resources::ServerResources,
    server::build_router,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Every backend the behavioural tests run against
pub const BACKEND_URLS: [&str; 2] = ["sqlite::memory:", "memory://"];

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Open a fresh database for `database_url`
pub async fn create_test_database(database_url: &str) -> Result<Database> {
    init_test_logging();
    Ok(Database::new(database_url).await?)
}

/// Fresh database per backend, paired with its URL for assertion messages
pub async fn all_test_databases() -> Result<Vec<(&'static str, Database)>> {
    let mut databases = Vec::with_capacity(BACKEND_URLS.len());
    for url in BACKEND_URLS {
        databases.push((url, create_test_database(url).await?));
    }
    Ok(databases)
}

/// Router over a fresh database, configured for `database_url`
pub async fn create_test_router(database_url: &str) -> Result<Router> {
    let database = create_test_database(database_url).await?;
    let mut config = ServerConfig::default();
    config.database.url = DatabaseUrl::parse_url(database_url)?;
    Ok(build_router(Arc::new(ServerResources::new(database, config))))
}

/// "Chicken Breast": 150 g, 45 g protein, 2.50
pub fn chicken_breast() -> IngredientCreate {
    let mut ingredient = IngredientCreate::new("Chicken Breast", 150.0, 2.50);
    ingredient
        .nutrition_facts
        .insert("protein".to_owned(), 45.0);
    ingredient
}

/// "Chicken Salad" holding a single chicken breast
pub fn chicken_salad() -> RecipeCreate {
    RecipeCreate::new("Chicken Salad").with_ingredient(chicken_breast())
}
