// ABOUTME: Core data models for the Nutricost API
// ABOUTME: Re-exports recipe, ingredient, cost ledger and nutrient types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! # Data Models
//!
//! - `Recipe`: a named, ordered collection of ingredients
//! - `Ingredient`: weight, nutrition facts and an append-only cost history
//! - `CostHistory`: the ledger deriving an ingredient's current cost
//! - `Nutrient` / `IngredientNutrient`: catalog entries and per-100 g amounts

mod cost;
mod ingredient;
mod nutrient;
mod recipe;

pub use cost::{CostEntry, CostEntryInput, CostHistory};
pub use ingredient::{Ingredient, IngredientCreate, NutritionFacts};
pub use nutrient::{IngredientNutrient, Nutrient, NutrientAmount, NutrientCreate};
pub use recipe::{Recipe, RecipeCreate};
