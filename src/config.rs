//! Configuration management for the support console.
//!
//! This module loads configuration from environment variables (a `.env`
//! file is honoured by `main`), with validation so obvious placeholder
//! values are caught before the first request goes out.

use std::env;

use url::Url;

use crate::error::SupportError;

/// Public Azure Resource Manager endpoint.
pub const DEFAULT_BASE_URL: &str = "https://management.azure.com";

/// Configuration for talking to the support management API.
///
/// The auth token is stored but never logged or included in error messages.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the management endpoint (no trailing slash).
    pub base_url: String,

    /// Subscription the tickets are filed against.
    pub subscription_id: String,

    /// Bearer token for the management audience.
    ///
    /// Optional at load time so the menu can still start; requests fail
    /// with `SupportError::MissingToken` until one is provided.
    auth_token: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SUPPORT_SUBSCRIPTION_ID` (required)
    /// - `SUPPORT_AUTH_TOKEN` (optional)
    /// - `SUPPORT_API_BASE_URL` (optional, defaults to [`DEFAULT_BASE_URL`])
    ///
    /// # Errors
    ///
    /// Returns `SupportError::Config` if the subscription id is missing or if
    /// any value fails validation.
    pub fn from_env() -> Result<Self, SupportError> {
        let subscription_id = Self::get_required_env("SUPPORT_SUBSCRIPTION_ID")?;
        let auth_token = Self::get_optional_env("SUPPORT_AUTH_TOKEN");
        let base_url = Self::get_optional_env("SUPPORT_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::build(base_url, subscription_id, auth_token)
    }

    /// Builds a validated configuration from explicit values.
    pub fn build(
        base_url: impl Into<String>,
        subscription_id: impl Into<String>,
        auth_token: Option<String>,
    ) -> Result<Self, SupportError> {
        let base_url = Self::validate_base_url(base_url.into())?;

        let subscription_id = subscription_id.into().trim().to_string();
        Self::validate_not_placeholder("SUPPORT_SUBSCRIPTION_ID", &subscription_id)?;

        let auth_token = auth_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(ref token) = auth_token {
            Self::validate_not_placeholder("SUPPORT_AUTH_TOKEN", token)?;
        }

        Ok(Config {
            base_url,
            subscription_id,
            auth_token,
        })
    }

    /// Returns the configured bearer token, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, SupportError> {
        Self::get_optional_env(name).ok_or_else(|| SupportError::missing_env(name))
    }

    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, SupportError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&url).map_err(|e| {
            SupportError::invalid_config(format!("SUPPORT_API_BASE_URL is not a valid URL: {}", e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(SupportError::invalid_config(
                "SUPPORT_API_BASE_URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    /// Rejects the `<TODO: ...>` style values sample configs ship with.
    fn validate_not_placeholder(name: &str, value: &str) -> Result<(), SupportError> {
        let lower = value.to_lowercase();
        let placeholder_patterns = ["<todo", "todo:", "replace with", "placeholder", "changeme"];

        if placeholder_patterns.iter().any(|p| lower.contains(p)) {
            return Err(SupportError::invalid_config(format!(
                "{} appears to be a placeholder value",
                name
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("subscription_id", &self.subscription_id)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
