// ABOUTME: Ingredient model with nutrition facts and cost history
// ABOUTME: Serializes the derived current cost alongside the stored entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use super::cost::{CostEntry, CostEntryInput, CostHistory};
use crate::constants::cost_notes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Nutrient name to amount, as supplied by the caller
pub type NutritionFacts = BTreeMap<String, f64>;

/// An ingredient belonging to exactly one recipe
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Weight in grams, always positive
    pub weight: f64,
    /// Nutrition facts keyed by nutrient name
    pub nutrition_facts: NutritionFacts,
    /// Owning recipe
    pub recipe_id: i64,
    /// Append-only cost history
    pub cost_entries: CostHistory,
}

impl Ingredient {
    /// Current cost derived from the history
    #[must_use]
    pub fn current_cost(&self) -> f64 {
        self.cost_entries.current_cost()
    }
}

/// Wire view of an ingredient carrying the derived `cost`
#[derive(Serialize)]
struct IngredientView<'a> {
    id: i64,
    name: &'a str,
    weight: f64,
    nutrition_facts: &'a NutritionFacts,
    recipe_id: i64,
    cost: f64,
    cost_entries: &'a [CostEntry],
}

impl Serialize for Ingredient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IngredientView {
            id: self.id,
            name: &self.name,
            weight: self.weight,
            nutrition_facts: &self.nutrition_facts,
            recipe_id: self.recipe_id,
            cost: self.current_cost(),
            cost_entries: self.cost_entries.entries(),
        }
        .serialize(serializer)
    }
}

/// Payload for creating or updating an ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientCreate {
    /// Display name
    pub name: String,
    /// Weight in grams
    pub weight: f64,
    /// Nutrition facts keyed by nutrient name
    pub nutrition_facts: NutritionFacts,
    /// Cost to record (initial cost on create, new cost on update)
    pub cost: f64,
    /// Additional entries appended after the automatic one
    #[serde(default)]
    pub cost_entries: Vec<CostEntryInput>,
}

impl IngredientCreate {
    /// Payload with no nutrition facts and no extra entries
    pub fn new(name: impl Into<String>, weight: f64, cost: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            nutrition_facts: NutritionFacts::new(),
            cost,
            cost_entries: Vec::new(),
        }
    }

    /// History for a freshly created ingredient: the initial cost, then extras in order
    #[must_use]
    pub fn initial_history(&self, now: DateTime<Utc>) -> CostHistory {
        self.seeded_history(now, cost_notes::INITIAL_COST)
    }

    /// History for an ingredient recreated by a full recipe replace.
    ///
    /// Same shape as [`Self::initial_history`], but the seed entry is noted
    /// "Updated cost".
    #[must_use]
    pub fn replacement_history(&self, now: DateTime<Utc>) -> CostHistory {
        self.seeded_history(now, cost_notes::UPDATED_COST)
    }

    fn seeded_history(&self, now: DateTime<Utc>, seed_notes: &str) -> CostHistory {
        let mut history = CostHistory::new();
        history.append(CostEntry::with_notes(self.cost, now, seed_notes));
        for extra in &self.cost_entries {
            history.append(extra.clone().into_entry(now));
        }
        history
    }

    /// Entries an update appends to `existing`.
    ///
    /// An "Updated cost" entry is produced only when the submitted cost differs
    /// from the current cost; explicit extras always follow.
    #[must_use]
    pub fn update_entries(&self, existing: &CostHistory, now: DateTime<Utc>) -> Vec<CostEntry> {
        let mut appended = Vec::with_capacity(self.cost_entries.len() + 1);
        if existing.differs_from_current(self.cost) {
            appended.push(CostEntry::with_notes(
                self.cost,
                now,
                cost_notes::UPDATED_COST,
            ));
        }
        appended.extend(
            self.cost_entries
                .iter()
                .cloned()
                .map(|extra| extra.into_entry(now)),
        );
        appended
    }
}
