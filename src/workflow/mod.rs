//! Demo workflows built from support API calls.
//!
//! A [`Workflow`] owns an API implementation and an output sink. Its step
//! methods (look up a service, reserve a ticket name, create, update, ...)
//! are chained by the [`Scenario`]s; every API response is printed to the
//! sink as indented JSON.

mod naming;
mod payload;
mod scenario;

#[cfg(test)]
pub(crate) mod fake;

pub use naming::*;
pub use payload::*;
pub use scenario::Scenario;

use std::io::Write;

use serde::Serialize;

use crate::api::SupportApi;
use crate::error::SupportError;
use crate::models::{
    find_by_display_name, CheckNameAvailabilityInput, CommunicationDetails, ProblemClassification,
    Service, SupportTicket, SupportTicketDetails, UpdateSupportTicket,
};

/// Runs scenarios against a [`SupportApi`], printing results to `out`.
pub struct Workflow<A, W> {
    api: A,
    out: W,
    name_generator: fn() -> String,
}

impl<A, W> Workflow<A, W>
where
    A: SupportApi,
    W: Write,
{
    /// Creates a workflow that names tickets with [`random_ticket_name`].
    pub fn new(api: A, out: W) -> Self {
        Self {
            api,
            out,
            name_generator: random_ticket_name,
        }
    }

    /// Replaces the ticket name generator.
    pub fn with_name_generator(mut self, name_generator: fn() -> String) -> Self {
        self.name_generator = name_generator;
        self
    }

    /// The API this workflow talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// The output sink.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consumes the workflow, returning the output sink.
    pub fn into_out(self) -> W {
        self.out
    }

    /// Writes `value` as indented JSON followed by a newline.
    pub fn print_json<T: Serialize>(&mut self, value: &T) -> Result<(), SupportError> {
        let text = serde_json::to_string_pretty(value)?;
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    /// Finds the first service whose display name contains `needle`.
    pub async fn find_service(&mut self, needle: &str) -> Result<Service, SupportError> {
        let services = self.api.list_services().await?;
        tracing::debug!(count = services.len(), "Listed services");

        let service = find_by_display_name(&services, needle)
            .cloned()
            .ok_or_else(|| SupportError::no_match("service", needle))?;

        tracing::info!(
            service = %service.name,
            display_name = %service.properties.display_name,
            "Selected service"
        );
        Ok(service)
    }

    /// Finds the first problem classification of `service_name` whose
    /// display name contains `needle`.
    pub async fn find_problem_classification(
        &mut self,
        service_name: &str,
        needle: &str,
    ) -> Result<ProblemClassification, SupportError> {
        let classifications = self.api.list_problem_classifications(service_name).await?;
        tracing::debug!(
            service = %service_name,
            count = classifications.len(),
            "Listed problem classifications"
        );

        let classification = find_by_display_name(&classifications, needle)
            .cloned()
            .ok_or_else(|| SupportError::no_match("problem classification", needle))?;

        tracing::info!(
            problem_classification = %classification.name,
            display_name = %classification.properties.display_name,
            "Selected problem classification"
        );
        Ok(classification)
    }

    /// Generates ticket names until the service reports one as available.
    ///
    /// # Errors
    ///
    /// Returns `SupportError::NameUnavailable` after [`MAX_NAME_ATTEMPTS`]
    /// taken names, or the first error from the availability check.
    pub async fn reserve_ticket_name(&mut self) -> Result<String, SupportError> {
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let candidate = (self.name_generator)();
            let availability = self
                .api
                .check_ticket_name_availability(&CheckNameAvailabilityInput::support_ticket(
                    candidate.as_str(),
                ))
                .await?;

            if availability.is_available() {
                tracing::info!(ticket = %candidate, attempt, "Ticket name is available");
                return Ok(candidate);
            }

            tracing::debug!(
                ticket = %candidate,
                attempt,
                reason = availability.reason.as_deref().unwrap_or("unknown"),
                "Ticket name taken, trying another"
            );
        }

        Err(SupportError::NameUnavailable {
            attempts: MAX_NAME_ATTEMPTS,
        })
    }

    /// Creates a ticket and prints it.
    pub async fn create_ticket(
        &mut self,
        ticket_name: &str,
        details: &SupportTicketDetails,
    ) -> Result<SupportTicket, SupportError> {
        let ticket = self.api.create_support_ticket(ticket_name, details).await?;
        tracing::info!(
            ticket = %ticket_name,
            severity = details.severity.as_str(),
            support_ticket_id = ticket.properties.support_ticket_id.as_deref().unwrap_or("-"),
            "Created support ticket"
        );
        self.print_json(&ticket)?;
        Ok(ticket)
    }

    /// Applies an update to a ticket and prints the result.
    pub async fn update_ticket(
        &mut self,
        ticket_name: &str,
        update: &UpdateSupportTicket,
    ) -> Result<SupportTicket, SupportError> {
        let ticket = self.api.update_support_ticket(ticket_name, update).await?;
        tracing::info!(
            ticket = %ticket_name,
            severity = update.severity.map(|s| s.as_str()),
            status = update.status.map(|s| s.as_str()),
            "Updated support ticket"
        );
        self.print_json(&ticket)?;
        Ok(ticket)
    }

    /// Posts a communication named `{ticket}_communication`.
    ///
    /// A taken name is only logged; the service rejects the create if it
    /// really is a duplicate.
    pub async fn add_communication(
        &mut self,
        ticket_name: &str,
        details: &CommunicationDetails,
    ) -> Result<(), SupportError> {
        let name = communication_name(ticket_name);
        let availability = self
            .api
            .check_communication_name_availability(
                ticket_name,
                &CheckNameAvailabilityInput::communication(name.as_str()),
            )
            .await?;
        if !availability.is_available() {
            tracing::warn!(
                ticket = %ticket_name,
                communication = %name,
                "Communication name reported as unavailable"
            );
        }

        let communication = self
            .api
            .create_communication(ticket_name, &name, details)
            .await?;
        tracing::info!(ticket = %ticket_name, communication = %name, "Added communication");
        self.print_json(&communication)
    }

    /// Runs one scenario to completion.
    ///
    /// The first failing step stops the scenario and its error is returned.
    pub async fn run(&mut self, scenario: Scenario) -> Result<(), SupportError> {
        tracing::info!(scenario = scenario.title(), "Running scenario");
        scenario.execute(self).await
    }
}
