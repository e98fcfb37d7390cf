// ABOUTME: Re-exports pagination types from nutricost-core for unified type identity
// ABOUTME: Ensures PageQuery/PageParams are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

pub use nutricost_core::pagination::*;
