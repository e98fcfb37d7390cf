// ABOUTME: Nutrient catalog and per-ingredient nutrient amount models
// ABOUTME: Nutrient amounts are a join entity keyed by (ingredient, nutrient)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use serde::{Deserialize, Serialize};

/// A nutrient in the catalog, e.g. "protein" measured in "g"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrient {
    /// Unique identifier
    pub id: i64,
    /// Unique name
    pub name: String,
    /// Measurement unit ("g", "mg", ...)
    pub unit: String,
}

/// Payload for adding a nutrient to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientCreate {
    /// Unique name
    pub name: String,
    /// Measurement unit
    pub unit: String,
}

impl NutrientCreate {
    /// Build a nutrient payload
    pub fn new(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
        }
    }
}

/// Amount of a nutrient contained in 100 g of an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientNutrient {
    /// Ingredient side of the link
    pub ingredient_id: i64,
    /// Nutrient side of the link
    pub nutrient_id: i64,
    /// Nutrient name, joined from the catalog
    pub nutrient_name: String,
    /// Nutrient unit, joined from the catalog
    pub unit: String,
    /// Amount per 100 g
    pub amount: f64,
}

/// Body of `PUT /ingredients/{id}/nutrients/{nutrient_id}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientAmount {
    /// Amount per 100 g
    pub amount: f64,
}
