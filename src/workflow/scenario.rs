//! The five demo scenarios offered by the menu.

use std::io::Write;

use chrono::Utc;

use super::payload::{
    additional_contact, compute_vm_quota, default_ticket_details, open_tickets_filter,
    test_communication,
};
use super::Workflow;
use crate::api::SupportApi;
use crate::error::SupportError;
use crate::models::{Severity, Status, SupportTicketDetails, UpdateSupportTicket};

/// A canned sequence of support API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// List open tickets created in the past week.
    OpenTicketsLastWeek,
    /// Request more Compute VM cores, add a communication, close.
    ComputeVmQuota,
    /// Billing refund ticket, raise then lower severity, close.
    BillingRefund,
    /// Subscription cancellation ticket, add a contact email, close.
    CancelSubscription,
    /// Cosmos DB throttling ticket, close.
    CosmosDbThrottling,
}

impl Scenario {
    /// All scenarios in menu order.
    pub const ALL: [Scenario; 5] = [
        Scenario::OpenTicketsLastWeek,
        Scenario::ComputeVmQuota,
        Scenario::BillingRefund,
        Scenario::CancelSubscription,
        Scenario::CosmosDbThrottling,
    ];

    /// Menu number (1-based).
    pub fn number(&self) -> usize {
        match self {
            Scenario::OpenTicketsLastWeek => 1,
            Scenario::ComputeVmQuota => 2,
            Scenario::BillingRefund => 3,
            Scenario::CancelSubscription => 4,
            Scenario::CosmosDbThrottling => 5,
        }
    }

    /// Looks a scenario up by menu number.
    pub fn from_number(number: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == number)
    }

    /// Menu line describing the scenario.
    pub fn title(&self) -> &'static str {
        match self {
            Scenario::OpenTicketsLastWeek => {
                "Get list of tickets that are in open state from past week"
            }
            Scenario::ComputeVmQuota => {
                "Create Compute VM cores support ticket and add new communication to the ticket"
            }
            Scenario::BillingRefund => "Create Billing support ticket and update severity",
            Scenario::CancelSubscription => {
                "Create Subscription management support ticket and update additional contact details"
            }
            Scenario::CosmosDbThrottling => {
                "Create Technical support ticket for CosmosDb throttling issue"
            }
        }
    }

    pub(super) async fn execute<A, W>(self, wf: &mut Workflow<A, W>) -> Result<(), SupportError>
    where
        A: SupportApi,
        W: Write,
    {
        match self {
            Scenario::OpenTicketsLastWeek => {
                let filter = open_tickets_filter(Utc::now());
                let tickets = wf.api.list_support_tickets(None, Some(&filter)).await?;
                tracing::info!(count = tickets.len(), "Listed open tickets");
                wf.print_json(&tickets)
            }
            Scenario::ComputeVmQuota => {
                let (ticket_name, mut details) =
                    prepare_ticket(wf, "service and subscription limits", "compute-vm").await?;
                details.quota_ticket_details = Some(compute_vm_quota());
                wf.create_ticket(&ticket_name, &details).await?;

                let mut steps = FollowUps::new(&ticket_name);
                let result = wf
                    .add_communication(&ticket_name, &test_communication())
                    .await;
                steps.record(wf, "add communication", result)?;
                let result = wf
                    .update_ticket(&ticket_name, &UpdateSupportTicket::status(Status::Closed))
                    .await;
                steps.record(wf, "close ticket", result)?;
                steps.finish()
            }
            Scenario::BillingRefund => {
                let (ticket_name, details) =
                    prepare_ticket(wf, "billing", "refund request").await?;
                wf.create_ticket(&ticket_name, &details).await?;

                let mut steps = FollowUps::new(&ticket_name);
                let result = wf
                    .update_ticket(
                        &ticket_name,
                        &UpdateSupportTicket::severity(Severity::Moderate),
                    )
                    .await;
                steps.record(wf, "raise severity", result)?;
                let result = wf
                    .update_ticket(
                        &ticket_name,
                        &UpdateSupportTicket::severity(Severity::Minimal)
                            .with_status(Status::Closed),
                    )
                    .await;
                steps.record(wf, "lower severity and close", result)?;
                steps.finish()
            }
            Scenario::CancelSubscription => {
                let (ticket_name, details) =
                    prepare_ticket(wf, "subscription management", "cancel my subscription")
                        .await?;
                wf.create_ticket(&ticket_name, &details).await?;

                let mut steps = FollowUps::new(&ticket_name);
                let result = wf
                    .update_ticket(
                        &ticket_name,
                        &UpdateSupportTicket::contact(additional_contact()),
                    )
                    .await;
                steps.record(wf, "add contact", result)?;
                let result = wf
                    .update_ticket(&ticket_name, &UpdateSupportTicket::status(Status::Closed))
                    .await;
                steps.record(wf, "close ticket", result)?;
                steps.finish()
            }
            Scenario::CosmosDbThrottling => {
                let (ticket_name, details) = prepare_ticket(wf, "cosmos db", "throttling").await?;
                wf.create_ticket(&ticket_name, &details).await?;
                wf.update_ticket(&ticket_name, &UpdateSupportTicket::status(Status::Closed))
                    .await?;
                Ok(())
            }
        }
    }
}

/// Steps run on a ticket after it was created.
///
/// A failing step is reported and the remaining ones still run, so the
/// closing update is always attempted. The first failure is kept and
/// returned by [`FollowUps::finish`].
struct FollowUps<'a> {
    ticket_name: &'a str,
    first_error: Option<SupportError>,
}

impl<'a> FollowUps<'a> {
    fn new(ticket_name: &'a str) -> Self {
        Self {
            ticket_name,
            first_error: None,
        }
    }

    /// Reports a failed step on the console. Only writing that report can fail.
    fn record<T, A, W>(
        &mut self,
        wf: &mut Workflow<A, W>,
        step: &'static str,
        result: Result<T, SupportError>,
    ) -> Result<(), SupportError>
    where
        A: SupportApi,
        W: Write,
    {
        if let Err(e) = result {
            tracing::error!(ticket = %self.ticket_name, step, error = %e, "Follow-up step failed");
            writeln!(wf.out(), "{} failed for ticket {}: {}", step, self.ticket_name, e)?;
            self.first_error.get_or_insert(e);
        }
        Ok(())
    }

    fn finish(self) -> Result<(), SupportError> {
        self.first_error.map_or(Ok(()), Err)
    }
}

/// Steps shared by every ticket scenario: look up the service and
/// classification, reserve a name and build the default payload.
async fn prepare_ticket<A, W>(
    wf: &mut Workflow<A, W>,
    service_needle: &str,
    classification_needle: &str,
) -> Result<(String, SupportTicketDetails), SupportError>
where
    A: SupportApi,
    W: Write,
{
    let service = wf.find_service(service_needle).await?;
    let classification = wf
        .find_problem_classification(&service.name, classification_needle)
        .await?;
    let ticket_name = wf.reserve_ticket_name().await?;

    let details = default_ticket_details(&service.name, &classification.name);
    Ok((ticket_name, details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fake::{Call, FakeApi};
    use pretty_assertions::assert_eq;

    const NAME: &str = "ApiDemoConsoleApp_1_4_20_000007";

    fn fixed_name() -> String {
        NAME.to_string()
    }

    async fn run(
        api: FakeApi,
        scenario: Scenario,
    ) -> (Workflow<FakeApi, Vec<u8>>, Result<(), SupportError>) {
        let mut wf = Workflow::new(api, Vec::new()).with_name_generator(fixed_name);
        let result = wf.run(scenario).await;
        (wf, result)
    }

    /// Calls every ticket scenario starts with.
    fn ticket_prefix(service: &str) -> Vec<Call> {
        vec![
            Call::ListServices,
            Call::ListProblemClassifications(service.to_string()),
            Call::CheckTicketName(NAME.to_string()),
            Call::CreateTicket(NAME.to_string()),
        ]
    }

    /// Update payloads sent, including the ones the API rejected.
    fn attempted_updates(wf: &Workflow<FakeApi, Vec<u8>>) -> Vec<UpdateSupportTicket> {
        wf.api()
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::UpdateTicket(_, update) => Some(update),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_menu_numbers_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_number(scenario.number()), Some(scenario));
        }
        assert_eq!(Scenario::from_number(0), None);
        assert_eq!(Scenario::from_number(6), None);
    }

    #[tokio::test]
    async fn test_open_tickets_lists_with_filter() {
        let (wf, result) = run(FakeApi::standard(), Scenario::OpenTicketsLastWeek).await;
        result.unwrap();

        let calls = wf.api().calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::ListTickets(None, Some(filter)) => {
                assert!(filter.starts_with("status eq 'Open' and CreatedDate gt "));
            }
            other => panic!("unexpected call: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_compute_vm_quota_call_order() {
        let (wf, result) = run(FakeApi::standard(), Scenario::ComputeVmQuota).await;
        result.unwrap();

        let mut expected = ticket_prefix("svc-quota");
        expected.extend([
            Call::CheckCommunicationName(NAME.to_string(), format!("{NAME}_communication")),
            Call::CreateCommunication(NAME.to_string(), format!("{NAME}_communication")),
            Call::UpdateTicket(NAME.to_string(), UpdateSupportTicket::status(Status::Closed)),
        ]);
        assert_eq!(wf.api().calls(), expected);

        let created = wf.api().created_tickets();
        let details = &created[0];
        assert_eq!(
            details.service_id,
            "/providers/Microsoft.Support/services/svc-quota"
        );
        assert_eq!(
            details.problem_classification_id,
            "/providers/Microsoft.Support/services/svc-quota/problemClassifications/pc-cores"
        );
        let quota = details.quota_ticket_details.as_ref().unwrap();
        assert_eq!(quota.quota_change_requests[0].region, "EastUS");
    }

    #[tokio::test]
    async fn test_billing_refund_updates_severity_only_then_closes() {
        let (wf, result) = run(FakeApi::standard(), Scenario::BillingRefund).await;
        result.unwrap();

        let mut expected = ticket_prefix("svc-billing");
        expected.extend([
            Call::UpdateTicket(
                NAME.to_string(),
                UpdateSupportTicket::severity(Severity::Moderate),
            ),
            Call::UpdateTicket(
                NAME.to_string(),
                UpdateSupportTicket::severity(Severity::Minimal).with_status(Status::Closed),
            ),
        ]);
        assert_eq!(wf.api().calls(), expected);

        let updates = wf.api().updates();
        let first_update = &updates[0];
        assert_eq!(first_update.status, None);
        assert_eq!(first_update.contact_details, None);
        assert!(wf.api().created_tickets()[0].quota_ticket_details.is_none());
    }

    #[tokio::test]
    async fn test_cancel_subscription_updates_contact_only() {
        let (wf, result) = run(FakeApi::standard(), Scenario::CancelSubscription).await;
        result.unwrap();

        let mut expected = ticket_prefix("svc-subs");
        expected.extend([
            Call::UpdateTicket(
                NAME.to_string(),
                UpdateSupportTicket::contact(additional_contact()),
            ),
            Call::UpdateTicket(NAME.to_string(), UpdateSupportTicket::status(Status::Closed)),
        ]);
        assert_eq!(wf.api().calls(), expected);

        let updates = wf.api().updates();
        let contact_update = &updates[0];
        assert_eq!(contact_update.severity, None);
        assert_eq!(contact_update.status, None);
    }

    #[tokio::test]
    async fn test_cosmos_db_throttling_call_order() {
        let (wf, result) = run(FakeApi::standard(), Scenario::CosmosDbThrottling).await;
        result.unwrap();

        let mut expected = ticket_prefix("svc-cosmos");
        expected.push(Call::UpdateTicket(
            NAME.to_string(),
            UpdateSupportTicket::status(Status::Closed),
        ));
        assert_eq!(wf.api().calls(), expected);
    }

    #[tokio::test]
    async fn test_failed_create_stops_scenario() {
        let api = FakeApi::standard().failing_on("create_support_ticket");
        let (wf, result) = run(api, Scenario::ComputeVmQuota).await;

        assert!(matches!(result, Err(SupportError::Authentication)));
        assert_eq!(wf.api().calls(), ticket_prefix("svc-quota"));
    }

    #[tokio::test]
    async fn test_failed_communication_still_closes_ticket() {
        let api = FakeApi::standard().failing_on("create_communication");
        let (wf, result) = run(api, Scenario::ComputeVmQuota).await;

        assert!(matches!(result, Err(SupportError::Authentication)));
        let calls = wf.api().calls();
        assert_eq!(
            calls.last(),
            Some(&Call::UpdateTicket(
                NAME.to_string(),
                UpdateSupportTicket::status(Status::Closed)
            ))
        );

        let out = String::from_utf8(wf.into_out()).unwrap();
        assert!(out.contains(&format!("add communication failed for ticket {NAME}")));
    }

    #[tokio::test]
    async fn test_failed_update_still_attempts_close() {
        let api = FakeApi::standard().failing_on("update_support_ticket");
        let (wf, result) = run(api, Scenario::BillingRefund).await;

        assert!(matches!(result, Err(SupportError::Authentication)));
        let updates = attempted_updates(&wf);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].status, Some(Status::Closed));
    }

    #[tokio::test]
    async fn test_failed_contact_update_still_attempts_close() {
        let api = FakeApi::standard().failing_on("update_support_ticket");
        let (wf, result) = run(api, Scenario::CancelSubscription).await;

        assert!(result.is_err());
        assert_eq!(
            attempted_updates(&wf),
            vec![
                UpdateSupportTicket::contact(additional_contact()),
                UpdateSupportTicket::status(Status::Closed),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_classification_stops_before_name_check() {
        let api = FakeApi::standard().without_classifications();
        let (wf, result) = run(api, Scenario::CosmosDbThrottling).await;

        assert!(matches!(result, Err(SupportError::NoMatch { .. })));
        assert_eq!(
            wf.api().calls(),
            vec![
                Call::ListServices,
                Call::ListProblemClassifications("svc-cosmos".to_string()),
            ]
        );
    }

    #[test]
    fn test_run_with_block_on() {
        let mut wf = Workflow::new(FakeApi::standard(), Vec::new()).with_name_generator(fixed_name);
        tokio_test::block_on(wf.run(Scenario::CosmosDbThrottling)).unwrap();

        let out = String::from_utf8(wf.into_out()).unwrap();
        assert!(out.contains(NAME));
    }
}
