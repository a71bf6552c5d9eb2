//! Bearer token credentials.
//!
//! Acquiring a token is out of scope for this tool; paste one obtained from
//! `az account get-access-token` (or any other tool issuing tokens for the
//! `https://management.azure.com/` audience) into `SUPPORT_AUTH_TOKEN`.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::RequestBuilder;

use crate::error::SupportError;

/// Static bearer token attached to every outgoing request.
#[derive(Clone, Default)]
pub struct BearerCredentials {
    /// SECURITY: Never log this value!
    token: Option<String>,
}

impl BearerCredentials {
    /// Creates credentials from an optional token.
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Returns true if a token is available.
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Adds the `Authorization` and `Accept` headers to a request.
    ///
    /// # Errors
    ///
    /// Returns `SupportError::MissingToken` if no token is configured, so
    /// the request is never sent.
    pub fn apply(&self, request: RequestBuilder) -> Result<RequestBuilder, SupportError> {
        let token = self.token.as_deref().ok_or(SupportError::MissingToken)?;

        Ok(request
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json"))
    }

    /// Redacts the token from a message.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn sanitize(&self, message: &str) -> String {
        match self.token.as_deref() {
            Some(token) => SupportError::sanitize_message(message, token),
            None => message.to_string(),
        }
    }

    /// Renders an error with the token redacted.
    pub(crate) fn sanitize_error(&self, error: &SupportError) -> String {
        match self.token.as_deref() {
            Some(token) => error.sanitized_display(token),
            None => error.to_string(),
        }
    }
}

impl std::fmt::Debug for BearerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerCredentials")
            .field("configured", &self.is_configured())
            .finish()
    }
}
