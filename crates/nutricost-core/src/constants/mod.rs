// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for cost notes, pagination and service identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Labels written into the `notes` field of automatically recorded cost entries
pub mod cost_notes {
    /// Notes for the entry seeded from the cost supplied at ingredient creation
    pub const INITIAL_COST: &str = "Initial cost";
    /// Notes for the entry appended when an update changes the cost
    pub const UPDATED_COST: &str = "Updated cost";
}

/// Pagination defaults and bounds for list endpoints
pub mod pagination {
    /// Default number of records skipped
    pub const DEFAULT_SKIP: i64 = 0;
    /// Default page size
    pub const DEFAULT_LIMIT: i64 = 100;
    /// Largest page size a caller may request
    pub const MAX_LIMIT: i64 = 1000;
}

/// Service identity used in logs and the root endpoint
pub mod service_names {
    /// Service name used in structured logging
    pub const NUTRICOST_SERVER: &str = "nutricost-server";
    /// Greeting returned by `GET /`
    pub const WELCOME_MESSAGE: &str = "Welcome to the Nutricost API";
}

/// Tolerance used when deciding whether a submitted cost differs from the current one
pub const COST_EPSILON: f64 = 1e-9;
