//! HTTP client for the support management REST API.
//!
//! This module provides the `SupportClient` struct for making authenticated
//! requests against the `Microsoft.Support` resource provider.
//!
//! # Long-running creates
//!
//! Ticket and communication creation may answer `202 Accepted` with no body
//! while the service finishes provisioning. In that case the resource is
//! read back with a GET so callers always get the created resource.
//!
//! # Security
//!
//! The bearer token is never logged. All error bodies are sanitized before
//! they are stored in an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::SupportApi;
use crate::config::Config;
use crate::credentials::BearerCredentials;
use crate::error::SupportError;
use crate::models::{
    ArmList, CheckNameAvailabilityInput, CheckNameAvailabilityOutput, Communication,
    CommunicationDetails, ErrorResponse, ProblemClassification, PropertiesBody, Service,
    SupportTicket, SupportTicketDetails, UpdateSupportTicket,
};

/// API version of the support resource provider.
pub const API_VERSION: &str = "2020-04-01";

/// Provider path segment shared by every endpoint.
const PROVIDER: &str = "providers/Microsoft.Support";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum length for HTTP error response bodies kept in errors.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Most `nextLink` pages followed for one list call.
const MAX_PAGES: usize = 100;

/// Longest resource name accepted in a path segment.
const MAX_NAME_LEN: usize = 260;

/// HTTP client for the support management API.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = SupportClient::new(&config)?;
///
/// let services = client.list_services().await?;
/// ```
#[derive(Clone)]
pub struct SupportClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Management endpoint, e.g. `https://management.azure.com`.
    base_url: String,

    /// Subscription tickets are filed against.
    subscription_id: String,

    /// Bearer token attached to each request.
    credentials: BearerCredentials,
}

impl SupportClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SupportError::HttpClient` if the HTTP client fails to
    /// initialize, or `SupportError::Validation` if the subscription id
    /// cannot be used in a path.
    pub fn new(config: &Config) -> Result<Self, SupportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(SupportError::HttpClient)?;

        Self::validate_name(&config.subscription_id, "subscription_id")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            subscription_id: config.subscription_id.clone(),
            credentials: BearerCredentials::new(config.auth_token().map(str::to_string)),
        })
    }

    /// Returns the subscription id this client files tickets against.
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Returns true if requests can be authenticated.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_configured()
    }

    /// Renders `error` for display with the bearer token redacted.
    pub fn sanitize_error(&self, error: &SupportError) -> String {
        self.credentials.sanitize_error(error)
    }

    /// Validates that a resource name is safe to interpolate into a URL path.
    ///
    /// Resource names are letters, digits, `-`, `_` and `.`; anything else
    /// (slashes, `..`, query characters) is rejected before a request is built.
    fn validate_name(name: &str, field_name: &str) -> Result<(), SupportError> {
        let valid = !name.is_empty()
            && name.len() <= MAX_NAME_LEN
            && name != "."
            && name != ".."
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));

        if !valid {
            return Err(SupportError::validation(format!(
                "{} is not a valid resource name, got: {:?}",
                field_name,
                name.chars().take(50).collect::<String>()
            )));
        }
        Ok(())
    }

    /// `{base}/providers/Microsoft.Support{suffix}`
    fn tenant_url(&self, suffix: &str) -> String {
        format!("{}/{}{}", self.base_url, PROVIDER, suffix)
    }

    /// `{base}/subscriptions/{sub}/providers/Microsoft.Support{suffix}`
    fn subscription_url(&self, suffix: &str) -> String {
        format!(
            "{}/subscriptions/{}/{}{}",
            self.base_url,
            urlencoding::encode(&self.subscription_id),
            PROVIDER,
            suffix
        )
    }

    fn ticket_url(&self, ticket_name: &str, suffix: &str) -> String {
        self.subscription_url(&format!(
            "/supportTickets/{}{}",
            urlencoding::encode(ticket_name),
            suffix
        ))
    }

    /// Tests connectivity and authentication with a cheap list call.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the services list cannot be fetched.
    pub async fn test_connection(&self) -> Result<(), SupportError> {
        tracing::debug!("Testing connection to the support API");
        self.list_services().await?;
        tracing::info!("Connection test successful");
        Ok(())
    }

    /// Sends one request and returns the status and raw body.
    ///
    /// `api-version` is appended unless `url` already carries one (as
    /// `nextLink` URLs do).
    async fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<(StatusCode, String), SupportError> {
        tracing::debug!(method = %method, url = %url, "Making support API request");

        let mut req = self.http.request(method.clone(), url);
        if !url.contains("api-version=") {
            req = req.query(&[("api-version", API_VERSION)]);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let req = self.credentials.apply(req)?;

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                return SupportError::Timeout {
                    duration: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                    operation: format!("{} {}", method, url),
                };
            }
            SupportError::Http(e)
        })?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let text = response.text().await.map_err(SupportError::Http)?;
        tracing::trace!(status = %status, body = %text, "Support API response");

        Ok((status, text))
    }

    /// Sends a request and parses the JSON response body.
    async fn request<T>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, SupportError>
    where
        T: DeserializeOwned,
    {
        let (_, text) = self.send(method, url, query, body).await?;
        serde_json::from_str(&text).map_err(SupportError::Serialization)
    }

    /// Sends a PUT and returns the created resource, if the service
    /// returned one inline.
    async fn put<B, T>(&self, url: &str, body: &B) -> Result<Option<T>, SupportError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let (status, text) = self.send(Method::PUT, url, &[], Some(body)).await?;

        if status == StatusCode::ACCEPTED || text.trim().is_empty() {
            tracing::debug!(status = %status, "Create accepted without a resource body");
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(SupportError::Serialization)
    }

    /// Fetches every page of a list operation.
    async fn list_all<T>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, SupportError>
    where
        T: DeserializeOwned,
    {
        let mut page: ArmList<T> = self.request(Method::GET, url, query, None).await?;
        let mut items = std::mem::take(&mut page.value);
        let mut current = url.to_string();
        let mut pages = 1;

        while let Some(next_link) = page.next_link.take() {
            if next_link == current {
                tracing::warn!(url = %next_link, "nextLink points at the page just read, stopping");
                break;
            }
            if pages >= MAX_PAGES {
                tracing::warn!(pages, fetched = items.len(), "Page limit reached, stopping");
                break;
            }
            self.validate_next_link(&next_link)?;
            tracing::debug!(fetched = items.len(), "Following nextLink");
            page = self.request(Method::GET, &next_link, &[], None).await?;
            items.append(&mut page.value);
            current = next_link;
            pages += 1;
        }

        Ok(items)
    }

    /// Refuses to send the bearer token to a host other than the configured one.
    fn validate_next_link(&self, next_link: &str) -> Result<(), SupportError> {
        let parsed = Url::parse(next_link)
            .map_err(|e| SupportError::validation(format!("invalid nextLink: {}", e)))?;
        let base = Url::parse(&self.base_url)
            .map_err(|e| SupportError::validation(format!("invalid base URL: {}", e)))?;

        if parsed.scheme() != base.scheme()
            || parsed.host() != base.host()
            || parsed.port_or_known_default() != base.port_or_known_default()
        {
            return Err(SupportError::validation(format!(
                "nextLink origin mismatch: expected {}://{:?}, got {}://{:?}",
                base.scheme(),
                base.host_str(),
                parsed.scheme(),
                parsed.host_str()
            )));
        }
        Ok(())
    }

    /// Converts a failed response into a `SupportError`.
    async fn handle_http_error(
        &self,
        status: StatusCode,
        response: reqwest::Response,
    ) -> SupportError {
        let body = response.text().await.unwrap_or_default();
        let body = self.credentials.sanitize(&body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return SupportError::Authentication,
            StatusCode::NOT_FOUND => {
                let resource = serde_json::from_str::<ErrorResponse>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| "resource".to_string());
                return SupportError::NotFound { resource };
            }
            _ => {}
        }

        if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(&body) {
            return SupportError::Api {
                status,
                code: envelope.error.code,
                message: truncate_error_text(envelope.error.message),
            };
        }

        SupportError::HttpStatus {
            status,
            body: truncate_error_text(body),
        }
    }

    /// Gets a single communication on a ticket.
    pub async fn get_communication(
        &self,
        ticket_name: &str,
        communication_name: &str,
    ) -> Result<Communication, SupportError> {
        Self::validate_name(ticket_name, "ticket_name")?;
        Self::validate_name(communication_name, "communication_name")?;
        let url = self.ticket_url(
            ticket_name,
            &format!("/communications/{}", urlencoding::encode(communication_name)),
        );

        self.request(Method::GET, &url, &[], None).await
    }
}

/// Cuts text kept in an error down to `MAX_ERROR_BODY_LEN` bytes.
fn truncate_error_text(text: String) -> String {
    if text.len() <= MAX_ERROR_BODY_LEN {
        return text;
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &text[..end])
}

/// Builds `$top` / `$filter` query pairs.
fn list_query(top: Option<u32>, filter: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(top) = top {
        query.push(("$top", top.to_string()));
    }
    if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
        query.push(("$filter", filter.to_string()));
    }
    query
}

#[async_trait]
impl SupportApi for SupportClient {
    async fn list_services(&self) -> Result<Vec<Service>, SupportError> {
        self.list_all(&self.tenant_url("/services"), &[]).await
    }

    async fn list_problem_classifications(
        &self,
        service_name: &str,
    ) -> Result<Vec<ProblemClassification>, SupportError> {
        Self::validate_name(service_name, "service_name")?;
        let url = self.tenant_url(&format!(
            "/services/{}/problemClassifications",
            urlencoding::encode(service_name)
        ));

        self.list_all(&url, &[]).await.map_err(|e| {
            if matches!(e, SupportError::NotFound { .. }) {
                SupportError::not_found(format!("service {}", service_name))
            } else {
                e
            }
        })
    }

    async fn check_ticket_name_availability(
        &self,
        input: &CheckNameAvailabilityInput,
    ) -> Result<CheckNameAvailabilityOutput, SupportError> {
        let body = serde_json::to_value(input)?;
        let url = self.subscription_url("/checkNameAvailability");

        self.request(Method::POST, &url, &[], Some(body)).await
    }

    async fn list_support_tickets(
        &self,
        top: Option<u32>,
        filter: Option<&str>,
    ) -> Result<Vec<SupportTicket>, SupportError> {
        let url = self.subscription_url("/supportTickets");
        self.list_all(&url, &list_query(top, filter)).await
    }

    async fn get_support_ticket(&self, ticket_name: &str) -> Result<SupportTicket, SupportError> {
        Self::validate_name(ticket_name, "ticket_name")?;
        let url = self.ticket_url(ticket_name, "");

        self.request(Method::GET, &url, &[], None).await.map_err(|e| {
            if matches!(e, SupportError::NotFound { .. }) {
                SupportError::not_found(format!("support ticket {}", ticket_name))
            } else {
                e
            }
        })
    }

    async fn create_support_ticket(
        &self,
        ticket_name: &str,
        details: &SupportTicketDetails,
    ) -> Result<SupportTicket, SupportError> {
        Self::validate_name(ticket_name, "ticket_name")?;
        let url = self.ticket_url(ticket_name, "");

        let created: Option<SupportTicket> = self
            .put(&url, &PropertiesBody { properties: details })
            .await?;
        match created {
            Some(ticket) => Ok(ticket),
            None => self.get_support_ticket(ticket_name).await,
        }
    }

    async fn update_support_ticket(
        &self,
        ticket_name: &str,
        update: &UpdateSupportTicket,
    ) -> Result<SupportTicket, SupportError> {
        Self::validate_name(ticket_name, "ticket_name")?;
        if update.is_empty() {
            return Err(SupportError::validation(
                "update must set at least one of severity, status or contact details",
            ));
        }
        let body = serde_json::to_value(update)?;
        let url = self.ticket_url(ticket_name, "");

        self.request(Method::PATCH, &url, &[], Some(body)).await
    }

    async fn check_communication_name_availability(
        &self,
        ticket_name: &str,
        input: &CheckNameAvailabilityInput,
    ) -> Result<CheckNameAvailabilityOutput, SupportError> {
        Self::validate_name(ticket_name, "ticket_name")?;
        let body = serde_json::to_value(input)?;
        let url = self.ticket_url(ticket_name, "/checkNameAvailability");

        self.request(Method::POST, &url, &[], Some(body)).await
    }

    async fn create_communication(
        &self,
        ticket_name: &str,
        communication_name: &str,
        details: &CommunicationDetails,
    ) -> Result<Communication, SupportError> {
        Self::validate_name(ticket_name, "ticket_name")?;
        Self::validate_name(communication_name, "communication_name")?;
        let url = self.ticket_url(
            ticket_name,
            &format!("/communications/{}", urlencoding::encode(communication_name)),
        );

        let created: Option<Communication> = self
            .put(&url, &PropertiesBody { properties: details })
            .await?;
        match created {
            Some(communication) => Ok(communication),
            None => self.get_communication(ticket_name, communication_name).await,
        }
    }

    async fn list_communications(
        &self,
        ticket_name: &str,
        top: Option<u32>,
        filter: Option<&str>,
    ) -> Result<Vec<Communication>, SupportError> {
        Self::validate_name(ticket_name, "ticket_name")?;
        let url = self.ticket_url(ticket_name, "/communications");
        self.list_all(&url, &list_query(top, filter)).await
    }
}
