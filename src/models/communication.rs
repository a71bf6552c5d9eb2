//! Communication models.
//!
//! A communication is a message attached to a support ticket's thread.

use serde::{Deserialize, Serialize};

use super::Resource;

/// A message on a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationDetails {
    /// Sender email address.
    #[serde(default)]
    pub sender: String,

    /// Subject line.
    #[serde(default)]
    pub subject: String,

    /// Message body.
    #[serde(default)]
    pub body: String,

    /// `web` or `phone`, set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_type: Option<String>,

    /// `inbound` or `outbound`, set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication_direction: Option<String>,

    /// Creation time (ISO 8601), set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

impl CommunicationDetails {
    /// Creates an outgoing message.
    pub fn new(
        sender: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            subject: subject.into(),
            body: body.into(),
            communication_type: None,
            communication_direction: None,
            created_date: None,
        }
    }
}

/// A communication resource.
pub type Communication = Resource<CommunicationDetails>;
