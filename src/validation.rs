// ABOUTME: Re-exports payload validation from nutricost-core
// ABOUTME: Stores call Validate before any mutation so bad payloads never touch state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

pub use nutricost_core::validation::*;
