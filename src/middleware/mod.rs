// ABOUTME: HTTP middleware for CORS, request ids and request tracing
// ABOUTME: Provides the span factory and CORS layer used when assembling the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{create_request_span, make_request_span, record_response, REQUEST_ID_HEADER};
