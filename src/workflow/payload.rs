//! Canned request payloads used by the demo scenarios.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::models::{
    CommunicationDetails, ContactProfile, QuotaChangeRequest, QuotaTicketDetails, Severity,
    SupportTicketDetails, UpdateContactProfile,
};

/// Title and description of every ticket the demo files.
pub const TICKET_TITLE: &str = "Test ticket from Azure Support sample console app";

/// Address used as the ticket contact and communication sender.
pub const CONTACT_EMAIL: &str = "abc@contoso.com";

/// Address added by the contact update scenario.
pub const ADDITIONAL_CONTACT_EMAIL: &str = "xyz@contoso.com";

/// `/providers/Microsoft.Support/services/{service}`
pub fn service_id(service_name: &str) -> String {
    format!("/providers/Microsoft.Support/services/{}", service_name)
}

/// `/providers/Microsoft.Support/services/{service}/problemClassifications/{classification}`
pub fn problem_classification_id(service_name: &str, classification_name: &str) -> String {
    format!(
        "{}/problemClassifications/{}",
        service_id(service_name),
        classification_name
    )
}

/// Contact profile attached to every demo ticket.
pub fn default_contact() -> ContactProfile {
    ContactProfile {
        first_name: "Foo".to_string(),
        last_name: "Bar".to_string(),
        preferred_contact_method: "email".to_string(),
        primary_email_address: CONTACT_EMAIL.to_string(),
        additional_email_addresses: Vec::new(),
        phone_number: None,
        preferred_time_zone: "Pacific Standard Time".to_string(),
        country: "usa".to_string(),
        preferred_support_language: "en-US".to_string(),
    }
}

/// Minimal-severity ticket for the given service and classification.
pub fn default_ticket_details(service_name: &str, classification_name: &str) -> SupportTicketDetails {
    SupportTicketDetails {
        severity: Severity::Minimal,
        title: TICKET_TITLE.to_string(),
        description: TICKET_TITLE.to_string(),
        service_id: service_id(service_name),
        problem_classification_id: problem_classification_id(service_name, classification_name),
        contact_details: default_contact(),
        quota_ticket_details: None,
        support_ticket_id: None,
        status: None,
        created_date: None,
        modified_date: None,
    }
}

/// Request to raise the DSv3 series core limit in East US.
pub fn compute_vm_quota() -> QuotaTicketDetails {
    QuotaTicketDetails {
        quota_change_request_version: Some("1.0".to_string()),
        quota_change_requests: vec![QuotaChangeRequest {
            region: "EastUS".to_string(),
            payload: r#"{"SKU":"DSv3 Series","NewLimit":104}"#.to_string(),
        }],
    }
}

/// Message posted on the quota ticket.
pub fn test_communication() -> CommunicationDetails {
    CommunicationDetails::new(
        CONTACT_EMAIL,
        "This is a test ticket",
        "This is a test ticket communication. Ticket can be closed without any work",
    )
}

/// Contact patch that only adds an extra email address.
pub fn additional_contact() -> UpdateContactProfile {
    UpdateContactProfile {
        additional_email_addresses: Some(vec![ADDITIONAL_CONTACT_EMAIL.to_string()]),
        ..Default::default()
    }
}

/// OData filter for open tickets created in the seven days before `now`.
pub fn open_tickets_filter(now: DateTime<Utc>) -> String {
    let since = now - Duration::days(7);
    format!(
        "status eq 'Open' and CreatedDate gt {}",
        since.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
