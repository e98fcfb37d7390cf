// ABOUTME: Route module organization for the Nutricost REST API
// ABOUTME: One router per domain, merged by the server when assembling the application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! Route module for the Nutricost API
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the [`DatabaseProvider`](crate::database_plugins::DatabaseProvider).

/// Root greeting, health and readiness routes
pub mod health;
/// Ingredient CRUD, cost history and nutrient amount routes
pub mod ingredients;
/// Nutrient catalog routes
pub mod nutrients;
/// Recipe CRUD routes
pub mod recipes;

/// Health route handlers
pub use health::HealthRoutes;
/// Ingredient route handlers
pub use ingredients::IngredientRoutes;
/// Nutrient route handlers
pub use nutrients::NutrientRoutes;
/// Recipe route handlers
pub use recipes::RecipeRoutes;
