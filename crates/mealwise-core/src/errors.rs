// ABOUTME: Unified error type, error codes, and HTTP error response formatting
// ABOUTME: Maps the service error taxonomy onto stable wire codes and HTTP statuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! This module provides the centralized error type for Mealwise. Every fallible
//! boundary returns [`AppResult`], and the HTTP layer turns an [`AppError`] into
//! a JSON body of the form `{"error": {"code", "message", "details"}}`.
//!
//! Server-side failures (`INTERNAL_ERROR`, `STORAGE_ERROR`) never expose their
//! internal message on the wire; the generic code description is sent instead.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation
    /// Malformed request body or parameter
    InvalidInput,
    /// A required request field is absent
    MissingRequiredField,
    /// Uploaded payload exceeds the configured limit
    PayloadTooLarge,

    // Configuration
    /// Collaborator credentials are not configured
    ConfigMissing,

    // External services
    /// External collaborator returned an error
    ExternalServiceError,
    /// External collaborator could not be reached
    ExternalServiceUnavailable,
    /// External collaborator exceeded its time budget
    ExternalTimeout,

    // Generation
    /// Model output could not be decoded as structured data
    GenerationParseFailed,
    /// Model output decoded but violated the diet-program schema
    GenerationSchemaInvalid,

    // Internal
    /// Temporary storage operation failed
    StorageError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput | Self::MissingRequiredField => 400,
            Self::PayloadTooLarge => 413,
            Self::ExternalServiceError
            | Self::GenerationParseFailed
            | Self::GenerationSchemaInvalid => 502,
            Self::ConfigMissing | Self::ExternalServiceUnavailable => 503,
            Self::ExternalTimeout => 504,
            Self::StorageError | Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::PayloadTooLarge => "The uploaded payload is too large",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalTimeout => "An external service did not respond in time",
            Self::GenerationParseFailed => "The generated response could not be parsed",
            Self::GenerationSchemaInvalid => "The generated response did not match the schema",
            Self::StorageError => "Storage operation failed",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Whether the message of this error may leak internal details
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::StorageError | Self::InternalError)
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Structured diagnostic details (null when absent)
    pub details: Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Payload over the configured limit
    #[must_use]
    pub fn payload_too_large(limit_bytes: usize) -> Self {
        Self::new(
            ErrorCode::PayloadTooLarge,
            format!("Upload exceeds the {limit_bytes} byte limit"),
        )
        .with_details(json!({ "limitBytes": limit_bytes }))
    }

    /// Collaborator credentials absent
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service unreachable
    #[must_use]
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service exceeded its timeout
    #[must_use]
    pub fn external_timeout(service: impl Into<String>, timeout_secs: u64) -> Self {
        Self::new(
            ErrorCode::ExternalTimeout,
            format!("{}: no response within {timeout_secs}s", service.into()),
        )
    }

    /// Storage failure
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Whether this error came from the collaborator transport rather than its payload
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ExternalServiceError
                | ErrorCode::ExternalServiceUnavailable
                | ErrorCode::ExternalTimeout
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error body
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Client-facing message
    pub message: String,
    /// Structured details, omitted when null
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let (message, details) = if error.code.is_internal() {
            (error.code.description().to_owned(), Value::Null)
        } else {
            (error.message, error.details)
        };
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message,
                details,
            },
        }
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::{AppError, ErrorResponse};
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use http::StatusCode;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!(code = ?self.code, "Request failed: {}", self.message);
            } else {
                tracing::debug!(code = ?self.code, "Request rejected: {}", self.message);
            }
            (status, Json(ErrorResponse::from(self))).into_response()
        }
    }
}
