// ABOUTME: In-memory backend for the DatabaseProvider trait
// ABOUTME: One RwLock guards all maps so every composite operation is atomic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! In-memory database implementation
//!
//! The store is an owned object: clones share the same state through an
//! `Arc`, and id counters are per-store atomics that only ever increase.
//! Writers hold the write lock for the whole operation, readers take the read
//! lock, so no caller ever sees a half-applied update.

use super::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CostEntry, CostEntryInput, CostHistory, Ingredient, IngredientCreate, IngredientNutrient,
    Nutrient, NutrientAmount, NutrientCreate, Recipe, RecipeCreate,
};
use crate::pagination::PageParams;
use crate::validation::Validate;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::mem;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory database implementation
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<MemoryStore>,
}

#[derive(Default)]
struct MemoryStore {
    state: RwLock<MemoryState>,
    next_recipe_id: AtomicI64,
    next_ingredient_id: AtomicI64,
    next_nutrient_id: AtomicI64,
}

struct StoredRecipe {
    name: String,
    ingredient_ids: Vec<i64>,
}

#[derive(Default)]
struct MemoryState {
    recipes: BTreeMap<i64, StoredRecipe>,
    ingredients: BTreeMap<i64, Ingredient>,
    nutrients: BTreeMap<i64, Nutrient>,
    /// Amount per 100 g keyed by (ingredient id, nutrient id)
    amounts: BTreeMap<(i64, i64), f64>,
}

fn next_id(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

impl MemoryState {
    fn recipe(&self, recipe_id: i64) -> Option<Recipe> {
        let stored = self.recipes.get(&recipe_id)?;
        Some(Recipe {
            id: recipe_id,
            name: stored.name.clone(),
            ingredients: stored
                .ingredient_ids
                .iter()
                .filter_map(|id| self.ingredients.get(id).cloned())
                .collect(),
        })
    }

    fn insert_ingredient(
        &mut self,
        id: i64,
        recipe_id: i64,
        ingredient: &IngredientCreate,
        cost_entries: CostHistory,
    ) -> Ingredient {
        let created = Ingredient {
            id,
            name: ingredient.name.clone(),
            weight: ingredient.weight,
            nutrition_facts: ingredient.nutrition_facts.clone(),
            recipe_id,
            cost_entries,
        };
        self.ingredients.insert(id, created.clone());
        created
    }

    /// Drop an ingredient together with its nutrient amounts
    fn remove_ingredient(&mut self, ingredient_id: i64) -> Option<Ingredient> {
        let removed = self.ingredients.remove(&ingredient_id)?;
        self.amounts
            .retain(|&(ingredient, _), _| ingredient != ingredient_id);
        Some(removed)
    }
}

impl InMemoryDatabase {
    /// Insert `ingredients` in order, each seeded by `seed`
    fn create_ingredients(
        &self,
        state: &mut MemoryState,
        recipe_id: i64,
        ingredients: &[IngredientCreate],
        seed: fn(&IngredientCreate, DateTime<Utc>) -> CostHistory,
    ) -> Vec<Ingredient> {
        let now = Utc::now();
        ingredients
            .iter()
            .map(|ingredient| {
                let id = next_id(&self.store.next_ingredient_id);
                state.insert_ingredient(id, recipe_id, ingredient, seed(ingredient, now))
            })
            .collect()
    }
}

#[async_trait]
impl DatabaseProvider for InMemoryDatabase {
    async fn new(database_url: &str) -> AppResult<Self> {
        info!(url = %database_url, "In-memory database ready");
        Ok(Self::default())
    }

    async fn migrate(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_info(&self) -> &'static str {
        "In-memory store"
    }

    async fn create_recipe(&self, recipe: &RecipeCreate) -> AppResult<Recipe> {
        recipe.validate()?;

        let mut state = self.store.state.write().await;
        let id = next_id(&self.store.next_recipe_id);
        let ingredients = self.create_ingredients(
            &mut state,
            id,
            &recipe.ingredients,
            IngredientCreate::initial_history,
        );
        state.recipes.insert(
            id,
            StoredRecipe {
                name: recipe.name.clone(),
                ingredient_ids: ingredients.iter().map(|i| i.id).collect(),
            },
        );

        info!(recipe.id = id, ingredients = ingredients.len(), "Recipe created");
        Ok(Recipe {
            id,
            name: recipe.name.clone(),
            ingredients,
        })
    }

    async fn get_recipe(&self, recipe_id: i64) -> AppResult<Recipe> {
        self.store
            .state
            .read()
            .await
            .recipe(recipe_id)
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))
    }

    async fn list_recipes(&self, page: PageParams) -> AppResult<Vec<Recipe>> {
        let state = self.store.state.read().await;
        Ok(page
            .slice(state.recipes.keys().copied())
            .into_iter()
            .filter_map(|id| state.recipe(id))
            .collect())
    }

    async fn update_recipe(&self, recipe_id: i64, recipe: &RecipeCreate) -> AppResult<Recipe> {
        recipe.validate()?;

        let mut state = self.store.state.write().await;
        let old_ids = match state.recipes.get_mut(&recipe_id) {
            Some(stored) => mem::take(&mut stored.ingredient_ids),
            None => return Err(AppError::not_found(format!("Recipe {recipe_id}"))),
        };
        for id in &old_ids {
            state.remove_ingredient(*id);
        }

        let ingredients = self.create_ingredients(
            &mut state,
            recipe_id,
            &recipe.ingredients,
            IngredientCreate::replacement_history,
        );
        if let Some(stored) = state.recipes.get_mut(&recipe_id) {
            stored.name.clone_from(&recipe.name);
            stored.ingredient_ids = ingredients.iter().map(|i| i.id).collect();
        }

        info!(
            recipe.id = recipe_id,
            ingredients_removed = old_ids.len(),
            ingredients_created = ingredients.len(),
            "Recipe replaced"
        );
        Ok(Recipe {
            id: recipe_id,
            name: recipe.name.clone(),
            ingredients,
        })
    }

    async fn delete_recipe(&self, recipe_id: i64) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let stored = state
            .recipes
            .remove(&recipe_id)
            .ok_or_else(|| AppError::not_found(format!("Recipe {recipe_id}")))?;
        for id in &stored.ingredient_ids {
            state.remove_ingredient(*id);
        }

        info!(recipe.id = recipe_id, "Recipe deleted");
        Ok(())
    }

    async fn create_ingredient(
        &self,
        recipe_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        ingredient.validate()?;

        let mut state = self.store.state.write().await;
        if !state.recipes.contains_key(&recipe_id) {
            return Err(AppError::not_found(format!("Recipe {recipe_id}")));
        }
        let id = next_id(&self.store.next_ingredient_id);
        let history = ingredient.initial_history(Utc::now());
        let created = state.insert_ingredient(id, recipe_id, ingredient, history);
        if let Some(stored) = state.recipes.get_mut(&recipe_id) {
            stored.ingredient_ids.push(id);
        }

        info!(
            ingredient.id = id,
            recipe.id = recipe_id,
            cost = created.current_cost(),
            "Ingredient created"
        );
        Ok(created)
    }

    async fn get_ingredient(&self, ingredient_id: i64) -> AppResult<Ingredient> {
        self.store
            .state
            .read()
            .await
            .ingredients
            .get(&ingredient_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))
    }

    async fn list_ingredients(&self, page: PageParams) -> AppResult<Vec<Ingredient>> {
        let state = self.store.state.read().await;
        Ok(page.slice(state.ingredients.values().cloned()))
    }

    async fn update_ingredient(
        &self,
        ingredient_id: i64,
        ingredient: &IngredientCreate,
    ) -> AppResult<Ingredient> {
        ingredient.validate()?;

        let mut state = self.store.state.write().await;
        let existing = state
            .ingredients
            .get_mut(&ingredient_id)
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        let appended = ingredient.update_entries(&existing.cost_entries, Utc::now());
        let entries_appended = appended.len();
        existing.name.clone_from(&ingredient.name);
        existing.weight = ingredient.weight;
        existing
            .nutrition_facts
            .clone_from(&ingredient.nutrition_facts);
        for entry in appended {
            existing.cost_entries.append(entry);
        }

        info!(
            ingredient.id = ingredient_id,
            entries_appended,
            cost = existing.current_cost(),
            "Ingredient updated"
        );
        Ok(existing.clone())
    }

    async fn delete_ingredient(&self, ingredient_id: i64) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        let removed = state
            .remove_ingredient(ingredient_id)
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;
        if let Some(stored) = state.recipes.get_mut(&removed.recipe_id) {
            stored.ingredient_ids.retain(|id| *id != ingredient_id);
        }

        info!(ingredient.id = ingredient_id, "Ingredient deleted");
        Ok(())
    }

    async fn add_cost_entry(
        &self,
        ingredient_id: i64,
        entry: &CostEntryInput,
    ) -> AppResult<Ingredient> {
        entry.validate()?;

        let mut state = self.store.state.write().await;
        let ingredient = state
            .ingredients
            .get_mut(&ingredient_id)
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))?;

        let stored = entry.clone().into_entry(Utc::now());
        info!(
            ingredient.id = ingredient_id,
            cost = stored.cost,
            vendor = stored.vendor.as_deref().unwrap_or(""),
            "Cost entry recorded"
        );
        ingredient.cost_entries.append(stored);
        Ok(ingredient.clone())
    }

    async fn get_cost_history(&self, ingredient_id: i64) -> AppResult<Vec<CostEntry>> {
        self.store
            .state
            .read()
            .await
            .ingredients
            .get(&ingredient_id)
            .map(|ingredient| ingredient.cost_entries.history_sorted_desc())
            .ok_or_else(|| AppError::not_found(format!("Ingredient {ingredient_id}")))
    }

    async fn create_nutrient(&self, nutrient: &NutrientCreate) -> AppResult<Nutrient> {
        nutrient.validate()?;

        let mut state = self.store.state.write().await;
        if state.nutrients.values().any(|n| n.name == nutrient.name) {
            return Err(AppError::already_exists(format!(
                "Nutrient '{}'",
                nutrient.name
            )));
        }
        let created = Nutrient {
            id: next_id(&self.store.next_nutrient_id),
            name: nutrient.name.clone(),
            unit: nutrient.unit.clone(),
        };
        state.nutrients.insert(created.id, created.clone());

        info!(nutrient.id = created.id, nutrient.name = %created.name, "Nutrient created");
        Ok(created)
    }

    async fn get_nutrient(&self, nutrient_id: i64) -> AppResult<Nutrient> {
        self.store
            .state
            .read()
            .await
            .nutrients
            .get(&nutrient_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Nutrient {nutrient_id}")))
    }

    async fn get_nutrient_by_name(&self, name: &str) -> AppResult<Nutrient> {
        self.store
            .state
            .read()
            .await
            .nutrients
            .values()
            .find(|n| n.name == name)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Nutrient '{name}'")))
    }

    async fn list_nutrients(&self, page: PageParams) -> AppResult<Vec<Nutrient>> {
        let state = self.store.state.read().await;
        Ok(page.slice(state.nutrients.values().cloned()))
    }

    async fn delete_nutrient(&self, nutrient_id: i64) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        if state.nutrients.remove(&nutrient_id).is_none() {
            return Err(AppError::not_found(format!("Nutrient {nutrient_id}")));
        }
        state
            .amounts
            .retain(|&(_, nutrient), _| nutrient != nutrient_id);

        info!(nutrient.id = nutrient_id, "Nutrient deleted");
        Ok(())
    }

    async fn set_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
        amount: f64,
    ) -> AppResult<IngredientNutrient> {
        NutrientAmount { amount }.validate()?;

        let mut state = self.store.state.write().await;
        if !state.ingredients.contains_key(&ingredient_id) {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }
        let nutrient = state
            .nutrients
            .get(&nutrient_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Nutrient {nutrient_id}")))?;
        state.amounts.insert((ingredient_id, nutrient_id), amount);

        Ok(IngredientNutrient {
            ingredient_id,
            nutrient_id,
            nutrient_name: nutrient.name,
            unit: nutrient.unit,
            amount,
        })
    }

    async fn list_ingredient_nutrients(
        &self,
        ingredient_id: i64,
    ) -> AppResult<Vec<IngredientNutrient>> {
        let state = self.store.state.read().await;
        if !state.ingredients.contains_key(&ingredient_id) {
            return Err(AppError::not_found(format!("Ingredient {ingredient_id}")));
        }

        Ok(state
            .amounts
            .range((ingredient_id, i64::MIN)..=(ingredient_id, i64::MAX))
            .filter_map(|(&(_, nutrient_id), &amount)| {
                state.nutrients.get(&nutrient_id).map(|n| IngredientNutrient {
                    ingredient_id,
                    nutrient_id,
                    nutrient_name: n.name.clone(),
                    unit: n.unit.clone(),
                    amount,
                })
            })
            .collect())
    }

    async fn remove_ingredient_nutrient(
        &self,
        ingredient_id: i64,
        nutrient_id: i64,
    ) -> AppResult<()> {
        let mut state = self.store.state.write().await;
        state
            .amounts
            .remove(&(ingredient_id, nutrient_id))
            .map(|_| ())
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Nutrient {nutrient_id} on ingredient {ingredient_id}"
                ))
            })
    }
}
