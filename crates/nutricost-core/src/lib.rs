// ABOUTME: Core types and constants for the Nutricost recipe costing API
// ABOUTME: Foundation crate with domain models, cost ledger, validation, pagination and errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

#![deny(unsafe_code)]

//! # Nutricost Core
//!
//! Foundation crate providing the shared domain types for the Nutricost API.
//! It has no knowledge of HTTP routing or persistence engines, which keeps it
//! stable while the server crate evolves.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Cost note labels, pagination bounds and other fixed values
//! - **models**: Recipes, ingredients, cost entries, nutrients and request payloads
//! - **pagination**: Offset/limit page parameters with clamping
//! - **validation**: Request validation performed before any store mutation

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Domain models and the cost history ledger
pub mod models;

/// Offset-based pagination parameters
pub mod pagination;

/// Validation of incoming create/update payloads
pub mod validation;
