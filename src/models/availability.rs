//! Name availability check models.

use serde::{Deserialize, Serialize};

/// Resource type whose name is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameResourceType {
    /// A support ticket name under the subscription.
    #[serde(rename = "Microsoft.Support/supportTickets")]
    SupportTickets,
    /// A communication name under a ticket.
    #[serde(rename = "Microsoft.Support/communications")]
    Communications,
}

/// Body of a `checkNameAvailability` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckNameAvailabilityInput {
    /// Candidate name.
    pub name: String,

    /// What kind of resource the name is for.
    #[serde(rename = "type")]
    pub resource_type: NameResourceType,
}

impl CheckNameAvailabilityInput {
    /// Input for a support ticket name.
    pub fn support_ticket(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: NameResourceType::SupportTickets,
        }
    }

    /// Input for a communication name.
    pub fn communication(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: NameResourceType::Communications,
        }
    }
}

/// Result of a `checkNameAvailability` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNameAvailabilityOutput {
    /// Whether the name can be used. Missing means no.
    #[serde(default)]
    pub name_available: Option<bool>,

    /// Why the name is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Details when the name is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckNameAvailabilityOutput {
    /// Returns true only if the service said the name is available.
    pub fn is_available(&self) -> bool {
        self.name_available.unwrap_or(false)
    }
}
