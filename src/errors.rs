// ABOUTME: Re-exports the unified error types from nutricost-core
// ABOUTME: Keeps AppError and ErrorCode identical across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

pub use nutricost_core::errors::*;
