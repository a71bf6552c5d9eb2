//! The operation surface of the support management API.
//!
//! Workflows are written against [`SupportApi`] rather than the concrete
//! HTTP client, so they can be driven by a fake in tests.

use async_trait::async_trait;

use crate::error::SupportError;
use crate::models::{
    CheckNameAvailabilityInput, CheckNameAvailabilityOutput, Communication, CommunicationDetails,
    ProblemClassification, Service, SupportTicket, SupportTicketDetails, UpdateSupportTicket,
};

/// Operations offered by the support resource provider.
#[async_trait]
pub trait SupportApi: Send + Sync {
    /// Lists all support services.
    async fn list_services(&self) -> Result<Vec<Service>, SupportError>;

    /// Lists problem classifications for a service.
    async fn list_problem_classifications(
        &self,
        service_name: &str,
    ) -> Result<Vec<ProblemClassification>, SupportError>;

    /// Checks whether a support ticket name is free in the subscription.
    async fn check_ticket_name_availability(
        &self,
        input: &CheckNameAvailabilityInput,
    ) -> Result<CheckNameAvailabilityOutput, SupportError>;

    /// Lists tickets in the subscription, optionally limited and filtered
    /// with an OData `$filter` expression.
    async fn list_support_tickets(
        &self,
        top: Option<u32>,
        filter: Option<&str>,
    ) -> Result<Vec<SupportTicket>, SupportError>;

    /// Gets a single ticket.
    async fn get_support_ticket(&self, ticket_name: &str) -> Result<SupportTicket, SupportError>;

    /// Creates a ticket under the given name.
    async fn create_support_ticket(
        &self,
        ticket_name: &str,
        details: &SupportTicketDetails,
    ) -> Result<SupportTicket, SupportError>;

    /// Applies a partial update to a ticket.
    async fn update_support_ticket(
        &self,
        ticket_name: &str,
        update: &UpdateSupportTicket,
    ) -> Result<SupportTicket, SupportError>;

    /// Checks whether a communication name is free on a ticket.
    async fn check_communication_name_availability(
        &self,
        ticket_name: &str,
        input: &CheckNameAvailabilityInput,
    ) -> Result<CheckNameAvailabilityOutput, SupportError>;

    /// Adds a communication to a ticket.
    async fn create_communication(
        &self,
        ticket_name: &str,
        communication_name: &str,
        details: &CommunicationDetails,
    ) -> Result<Communication, SupportError>;

    /// Lists communications on a ticket.
    async fn list_communications(
        &self,
        ticket_name: &str,
        top: Option<u32>,
        filter: Option<&str>,
    ) -> Result<Vec<Communication>, SupportError>;
}
