// ABOUTME: Security module for values crossing the service boundary
// ABOUTME: Hosts the allow-list sanitizer applied before third-party calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Allow-list transform for outbound third-party query values
pub mod outbound;

pub use outbound::OutboundSanitizer;
