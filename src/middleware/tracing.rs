// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Creates one http_request span per request and records status and latency on completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutricost Contributors

use axum::body::Body;
use http::{Request, Response};
use std::time::Duration;
use tracing::Span;

/// Header carrying the request id, generated when the caller omits it
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = tracing::field::Empty,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// `TraceLayer` span factory
///
/// Runs after the request id layer, so the header is always present here.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let span = create_request_span(request.method().as_str(), request.uri().path());
    if let Some(request_id) = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        span.record("request_id", request_id);
    }
    span
}

/// `TraceLayer` response hook
pub fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    span.record("status_code", response.status().as_u16());
    span.record("duration_ms", duration_ms);
    tracing::debug!(
        parent: span,
        status_code = response.status().as_u16(),
        duration_ms,
        "request completed"
    );
}
