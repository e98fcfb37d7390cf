// ABOUTME: Re-exports the domain models from nutricost-core
// ABOUTME: Recipe, Ingredient, cost ledger and nutrient catalog types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

pub use nutricost_core::models::*;
