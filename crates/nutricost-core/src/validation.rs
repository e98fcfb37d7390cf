// ABOUTME: Request validation run before any store mutation
// ABOUTME: Rejects non-positive weights, negative costs, non-finite numbers and blank names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! Validation of incoming payloads.
//!
//! A recipe is validated as a whole, so one bad ingredient rejects the request
//! before anything is written. Failures carry the offending field path in
//! `details.field`, e.g. `ingredients[1].weight`.

use crate::errors::{AppError, AppResult};
use crate::models::{CostEntryInput, IngredientCreate, NutrientAmount, NutrientCreate, RecipeCreate};
use serde_json::json;

/// Payloads that can be checked before they reach a store
pub trait Validate {
    /// Validate the payload
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailed` error naming the first invalid field
    fn validate(&self) -> AppResult<()> {
        self.validate_at("")
    }

    /// Validate with every field name prefixed by `path`
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailed` error naming the first invalid field
    fn validate_at(&self, path: &str) -> AppResult<()>;
}

fn field(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_owned()
    } else {
        format!("{path}.{name}")
    }
}

fn reject(field: String, message: &str) -> AppError {
    AppError::validation(format!("{field} {message}")).with_details(json!({ "field": field }))
}

fn require_name(path: &str, name: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(reject(field(path, name), "must not be empty"));
    }
    Ok(())
}

fn require_non_negative(path: &str, name: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() {
        return Err(reject(field(path, name), "must be a finite number"));
    }
    if value < 0.0 {
        return Err(reject(field(path, name), "must be greater than or equal to 0"));
    }
    Ok(())
}

impl Validate for CostEntryInput {
    fn validate_at(&self, path: &str) -> AppResult<()> {
        require_non_negative(path, "cost", self.cost)
    }
}

impl Validate for IngredientCreate {
    fn validate_at(&self, path: &str) -> AppResult<()> {
        require_name(path, "name", &self.name)?;

        if !self.weight.is_finite() {
            return Err(reject(field(path, "weight"), "must be a finite number"));
        }
        if self.weight <= 0.0 {
            return Err(reject(field(path, "weight"), "must be greater than 0"));
        }

        require_non_negative(path, "cost", self.cost)?;

        for (nutrient, amount) in &self.nutrition_facts {
            if !amount.is_finite() {
                return Err(reject(
                    field(path, &format!("nutrition_facts.{nutrient}")),
                    "must be a finite number",
                ));
            }
        }

        for (index, entry) in self.cost_entries.iter().enumerate() {
            entry.validate_at(&field(path, &format!("cost_entries[{index}]")))?;
        }
        Ok(())
    }
}

impl Validate for RecipeCreate {
    fn validate_at(&self, path: &str) -> AppResult<()> {
        require_name(path, "name", &self.name)?;
        for (index, ingredient) in self.ingredients.iter().enumerate() {
            ingredient.validate_at(&field(path, &format!("ingredients[{index}]")))?;
        }
        Ok(())
    }
}

impl Validate for NutrientCreate {
    fn validate_at(&self, path: &str) -> AppResult<()> {
        require_name(path, "name", &self.name)?;
        require_name(path, "unit", &self.unit)
    }
}

impl Validate for NutrientAmount {
    fn validate_at(&self, path: &str) -> AppResult<()> {
        require_non_negative(path, "amount", self.amount)
    }
}
