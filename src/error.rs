//! Error types for the support console.
//!
//! This module defines `SupportError`, the unified error type used throughout
//! the crate. Workflows propagate it with `?` and the menu loop is the only
//! place that turns it into console output.
//!
//! # Security
//!
//! Error messages built from response bodies are sanitized so the bearer
//! token never ends up in logs or on screen. Use `sanitize_message()` when
//! constructing messages from external sources.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all support console operations.
#[derive(Error, Debug)]
pub enum SupportError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// A request was about to be sent without a bearer token.
    #[error("no auth token configured - set SUPPORT_AUTH_TOKEN")]
    MissingToken,

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code without an error envelope.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, sanitized and truncated.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} ({operation})")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// The management API returned an `{ "error": { ... } }` envelope.
    #[error("support API error {code} (HTTP {status}): {message}")]
    Api {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// Provider error code, e.g. `InvalidParameter`.
        code: String,
        /// Human-readable error message from the provider.
        message: String,
    },

    /// Authentication or authorization failed (HTTP 401/403).
    #[error("authentication failed - check SUPPORT_AUTH_TOKEN")]
    Authentication,

    /// Requested resource was not found.
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that was not found.
        resource: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation failed before a request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// A lookup by display name found nothing.
    #[error("no {kind} with a display name containing {needle:?}")]
    NoMatch {
        /// What was being looked up ("service", "problem classification").
        kind: &'static str,
        /// The substring that was searched for.
        needle: String,
    },

    /// Every generated ticket name was already taken.
    #[error("no available ticket name found after {attempts} attempts")]
    NameUnavailable {
        /// How many candidate names were checked.
        attempts: u32,
    },

    /// Writing console output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SupportError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        SupportError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SupportError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SupportError::Validation(message.into())
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        SupportError::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a no-match error for a display-name lookup.
    pub fn no_match(kind: &'static str, needle: impl Into<String>) -> Self {
        SupportError::NoMatch {
            kind,
            needle: needle.into(),
        }
    }

    /// Replaces every occurrence of `token` in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, token: &str) -> String {
        if token.is_empty() {
            return message.to_string();
        }
        message.replace(token, "[REDACTED]")
    }

    /// Returns this error's display message with the token redacted.
    #[must_use]
    pub fn sanitized_display(&self, token: &str) -> String {
        Self::sanitize_message(&self.to_string(), token)
    }
}
