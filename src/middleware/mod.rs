// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request spans keyed by request ID and the CORS layer built from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request span creation
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{make_request_span, REQUEST_ID_HEADER};
