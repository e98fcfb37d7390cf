// ABOUTME: Recipe model owning an ordered list of ingredients
// ABOUTME: Includes the create/replace payload used by POST and PUT
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use super::ingredient::{Ingredient, IngredientCreate};
use serde::{Deserialize, Serialize};

/// A recipe and the ingredients it exclusively owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier, never reused
    pub id: i64,
    /// Display name
    pub name: String,
    /// Ingredients in insertion order
    pub ingredients: Vec<Ingredient>,
}

/// Payload for creating a recipe, or fully replacing one on update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCreate {
    /// Display name
    pub name: String,
    /// Ingredients to create, in order
    #[serde(default)]
    pub ingredients: Vec<IngredientCreate>,
}

impl RecipeCreate {
    /// Recipe payload without ingredients
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    /// Add an ingredient to the payload
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: IngredientCreate) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}
