//! Support ticket models.
//!
//! This module defines the create payload (which doubles as the returned
//! ticket properties), the contact profile, quota details and the PATCH
//! payload used for severity, status and contact updates.

use serde::{Deserialize, Serialize};

use super::Resource;

/// Ticket severity.
///
/// Serialized as the lowercase strings the API expects; parsing is
/// case-insensitive because responses are not consistent about case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minimal business impact.
    Minimal,
    /// Moderate business impact.
    Moderate,
    /// Critical business impact.
    Critical,
    /// Highest critical impact (Premium/Unified plans only).
    HighestCriticalImpact,
}

impl Severity {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minimal => "minimal",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
            Severity::HighestCriticalImpact => "highestcriticalimpact",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(Severity::Minimal),
            "moderate" => Ok(Severity::Moderate),
            "critical" => Ok(Severity::Critical),
            "highestcriticalimpact" => Ok(Severity::HighestCriticalImpact),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// Ticket status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Ticket is open.
    Open,
    /// Ticket is closed.
    Closed,
}

impl Status {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Closed => "closed",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "closed" => Ok(Status::Closed),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Deserializes a `FromStr` enum from a string, ignoring case.
fn deserialize_case_insensitive<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr<Err = String>,
{
    use serde::de::{self, Visitor};
    use std::marker::PhantomData;

    struct CaseInsensitiveVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for CaseInsensitiveVisitor<T>
    where
        T: std::str::FromStr<Err = String>,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value.parse().map_err(E::custom)
        }
    }

    deserializer.deserialize_str(CaseInsensitiveVisitor(PhantomData))
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserialize_case_insensitive(deserializer)
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserialize_case_insensitive(deserializer)
    }
}

/// Contact information attached to a ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactProfile {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// `email` or `phone`.
    pub preferred_contact_method: String,

    /// Primary email address.
    pub primary_email_address: String,

    /// Additional addresses copied on ticket updates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_email_addresses: Vec<String>,

    /// Phone number, required when the contact method is `phone`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Windows time zone name, e.g. `Pacific Standard Time`.
    pub preferred_time_zone: String,

    /// ISO 3166 alpha-3 country code.
    pub country: String,

    /// Language tag, e.g. `en-US`.
    pub preferred_support_language: String,
}

/// Partial contact profile for PATCH requests. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactProfile {
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// `email` or `phone`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<String>,

    /// Primary email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_email_address: Option<String>,

    /// Replaces the additional email list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_email_addresses: Option<Vec<String>>,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Windows time zone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time_zone: Option<String>,

    /// ISO 3166 alpha-3 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Language tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_support_language: Option<String>,
}

/// A single quota increase request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaChangeRequest {
    /// Azure region, e.g. `EastUS`.
    pub region: String,

    /// Quota-type specific JSON, sent as a string.
    pub payload: String,
}

/// Quota details for "Service and subscription limits" tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaTicketDetails {
    /// Payload schema version, `1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_change_request_version: Option<String>,

    /// Requested changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quota_change_requests: Vec<QuotaChangeRequest>,
}

/// Ticket properties, used both to create a ticket and to read one back.
///
/// Fields under "read-only" are filled in by the service; they stay `None`
/// on create so they are never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicketDetails {
    /// Business impact.
    pub severity: Severity,

    /// Ticket title.
    pub title: String,

    /// Detailed description.
    pub description: String,

    /// `/providers/Microsoft.Support/services/{service}`.
    pub service_id: String,

    /// `/providers/Microsoft.Support/services/{service}/problemClassifications/{name}`.
    pub problem_classification_id: String,

    /// Who to contact about the ticket.
    pub contact_details: ContactProfile,

    /// Quota change payload, for quota tickets only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_ticket_details: Option<QuotaTicketDetails>,

    // read-only
    /// Service-assigned ticket number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_ticket_id: Option<String>,

    /// Current status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Creation time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,

    /// Last modification time (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
}

/// A support ticket resource.
pub type SupportTicket = Resource<SupportTicketDetails>;

/// PATCH payload for an existing ticket. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupportTicket {
    /// New severity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Contact changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<UpdateContactProfile>,
}

impl UpdateSupportTicket {
    /// Update that only changes the severity.
    pub fn severity(severity: Severity) -> Self {
        Self {
            severity: Some(severity),
            ..Default::default()
        }
    }

    /// Update that only changes the status.
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Update that only changes contact details.
    pub fn contact(contact: UpdateContactProfile) -> Self {
        Self {
            contact_details: Some(contact),
            ..Default::default()
        }
    }

    /// Also sets the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if nothing would be changed.
    pub fn is_empty(&self) -> bool {
        self.severity.is_none() && self.status.is_none() && self.contact_details.is_none()
    }
}
