//! Common types shared across the API models.
//!
//! This module defines the list envelope, the error envelope and the
//! generic ARM resource wrapper used by every endpoint.

use serde::{Deserialize, Serialize};

/// Envelope for list operations: `{ "value": [...], "nextLink": "..." }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmList<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    /// Absolute URL of the next page, if there is one.
    #[serde(default)]
    pub next_link: Option<String>,
}

/// A resource in the `{ id, name, type, properties }` shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource<P> {
    /// Fully qualified resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Resource name, the last segment of the id.
    #[serde(default)]
    pub name: String,

    /// Resource type, e.g. `Microsoft.Support/supportTickets`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Resource-specific payload.
    pub properties: P,
}

/// Request body wrapper for PUT operations: `{ "properties": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct PropertiesBody<'a, P> {
    /// The payload being created.
    pub properties: &'a P,
}

/// Error envelope returned on failed calls.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// The error details.
    pub error: ErrorDetail,
}

/// Details inside an [`ErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    /// Provider error code, e.g. `InvalidParameter`.
    #[serde(default)]
    pub code: String,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}
