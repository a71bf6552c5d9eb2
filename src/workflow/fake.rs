//! In-memory [`SupportApi`] that records every call, for workflow tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::SupportApi;
use crate::error::SupportError;
use crate::models::{
    CheckNameAvailabilityInput, CheckNameAvailabilityOutput, Communication, CommunicationDetails,
    ProblemClassification, ProblemClassificationProperties, Resource, Service, ServiceProperties,
    Status, SupportTicket, SupportTicketDetails, UpdateSupportTicket,
};

use super::payload::default_ticket_details;

/// One recorded API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListServices,
    ListProblemClassifications(String),
    CheckTicketName(String),
    ListTickets(Option<u32>, Option<String>),
    GetTicket(String),
    CreateTicket(String),
    UpdateTicket(String, UpdateSupportTicket),
    CheckCommunicationName(String, String),
    CreateCommunication(String, String),
    ListCommunications(String),
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    created: Vec<SupportTicketDetails>,
    updates: Vec<UpdateSupportTicket>,
    ticket_name_availability: VecDeque<bool>,
}

pub struct FakeApi {
    services: Vec<Service>,
    classifications: HashMap<String, Vec<ProblemClassification>>,
    communication_name_available: bool,
    failing_on: Option<&'static str>,
    state: Mutex<State>,
}

fn resource<P>(name: &str, properties: P) -> Resource<P> {
    Resource {
        id: None,
        name: name.to_string(),
        resource_type: None,
        properties,
    }
}

fn service(name: &str, display_name: &str) -> Service {
    resource(
        name,
        ServiceProperties {
            display_name: display_name.to_string(),
            resource_types: Vec::new(),
        },
    )
}

fn classification(name: &str, display_name: &str) -> ProblemClassification {
    resource(
        name,
        ProblemClassificationProperties {
            display_name: display_name.to_string(),
        },
    )
}

impl FakeApi {
    /// A catalogue that satisfies every scenario.
    pub fn standard() -> Self {
        let services = vec![
            service("svc-vm", "Virtual Machine running Linux"),
            service("svc-quota", "Service and subscription limits (quotas)"),
            service("svc-billing", "Billing"),
            service("svc-subs", "Subscription management"),
            service("svc-cosmos", "Cosmos DB"),
        ];

        let mut classifications = HashMap::new();
        classifications.insert(
            "svc-quota".to_string(),
            vec![
                classification("pc-storage", "Storage: Azure Storage"),
                classification("pc-cores", "Compute-VM (cores-vCPUs) subscription limit increases"),
            ],
        );
        classifications.insert(
            "svc-billing".to_string(),
            vec![classification("pc-refund", "Refund request")],
        );
        classifications.insert(
            "svc-subs".to_string(),
            vec![classification("pc-cancel", "Cancel my subscription")],
        );
        classifications.insert(
            "svc-cosmos".to_string(),
            vec![classification("pc-throttle", "Throttling errors")],
        );

        Self {
            services,
            classifications,
            communication_name_available: true,
            failing_on: None,
            state: Mutex::new(State::default()),
        }
    }

    /// Answers for successive ticket name checks; once used up, names are available.
    pub fn with_ticket_name_availability(self, answers: Vec<bool>) -> Self {
        self.state.lock().unwrap().ticket_name_availability = answers.into();
        self
    }

    pub fn with_communication_name_available(mut self, available: bool) -> Self {
        self.communication_name_available = available;
        self
    }

    pub fn without_classifications(mut self) -> Self {
        self.classifications.clear();
        self
    }

    /// Makes the named operation fail with `SupportError::Authentication`.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.failing_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn created_tickets(&self) -> Vec<SupportTicketDetails> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn updates(&self) -> Vec<UpdateSupportTicket> {
        self.state.lock().unwrap().updates.clone()
    }

    fn record(&self, call: Call, operation: &'static str) -> Result<(), SupportError> {
        self.state.lock().unwrap().calls.push(call);
        if self.failing_on == Some(operation) {
            return Err(SupportError::Authentication);
        }
        Ok(())
    }

    fn ticket(name: &str, details: SupportTicketDetails) -> SupportTicket {
        resource(name, details)
    }
}

#[async_trait]
impl SupportApi for FakeApi {
    async fn list_services(&self) -> Result<Vec<Service>, SupportError> {
        self.record(Call::ListServices, "list_services")?;
        Ok(self.services.clone())
    }

    async fn list_problem_classifications(
        &self,
        service_name: &str,
    ) -> Result<Vec<ProblemClassification>, SupportError> {
        self.record(
            Call::ListProblemClassifications(service_name.to_string()),
            "list_problem_classifications",
        )?;
        Ok(self
            .classifications
            .get(service_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn check_ticket_name_availability(
        &self,
        input: &CheckNameAvailabilityInput,
    ) -> Result<CheckNameAvailabilityOutput, SupportError> {
        self.record(
            Call::CheckTicketName(input.name.clone()),
            "check_ticket_name_availability",
        )?;
        let available = self
            .state
            .lock()
            .unwrap()
            .ticket_name_availability
            .pop_front()
            .unwrap_or(true);
        Ok(CheckNameAvailabilityOutput {
            name_available: Some(available),
            reason: (!available).then(|| "AlreadyExists".to_string()),
            message: None,
        })
    }

    async fn list_support_tickets(
        &self,
        top: Option<u32>,
        filter: Option<&str>,
    ) -> Result<Vec<SupportTicket>, SupportError> {
        self.record(
            Call::ListTickets(top, filter.map(str::to_string)),
            "list_support_tickets",
        )?;
        Ok(vec![Self::ticket(
            "existing",
            default_ticket_details("svc-billing", "pc-refund"),
        )])
    }

    async fn get_support_ticket(&self, ticket_name: &str) -> Result<SupportTicket, SupportError> {
        self.record(Call::GetTicket(ticket_name.to_string()), "get_support_ticket")?;
        Ok(Self::ticket(
            ticket_name,
            default_ticket_details("svc-billing", "pc-refund"),
        ))
    }

    async fn create_support_ticket(
        &self,
        ticket_name: &str,
        details: &SupportTicketDetails,
    ) -> Result<SupportTicket, SupportError> {
        self.record(
            Call::CreateTicket(ticket_name.to_string()),
            "create_support_ticket",
        )?;
        self.state.lock().unwrap().created.push(details.clone());

        let mut created = details.clone();
        created.status = Some(Status::Open);
        Ok(Self::ticket(ticket_name, created))
    }

    async fn update_support_ticket(
        &self,
        ticket_name: &str,
        update: &UpdateSupportTicket,
    ) -> Result<SupportTicket, SupportError> {
        self.record(
            Call::UpdateTicket(ticket_name.to_string(), update.clone()),
            "update_support_ticket",
        )?;
        self.state.lock().unwrap().updates.push(update.clone());

        let mut details = default_ticket_details("svc", "pc");
        if let Some(severity) = update.severity {
            details.severity = severity;
        }
        details.status = update.status.or(Some(Status::Open));
        Ok(Self::ticket(ticket_name, details))
    }

    async fn check_communication_name_availability(
        &self,
        ticket_name: &str,
        input: &CheckNameAvailabilityInput,
    ) -> Result<CheckNameAvailabilityOutput, SupportError> {
        self.record(
            Call::CheckCommunicationName(ticket_name.to_string(), input.name.clone()),
            "check_communication_name_availability",
        )?;
        Ok(CheckNameAvailabilityOutput {
            name_available: Some(self.communication_name_available),
            reason: None,
            message: None,
        })
    }

    async fn create_communication(
        &self,
        ticket_name: &str,
        communication_name: &str,
        details: &CommunicationDetails,
    ) -> Result<Communication, SupportError> {
        self.record(
            Call::CreateCommunication(ticket_name.to_string(), communication_name.to_string()),
            "create_communication",
        )?;
        Ok(resource(communication_name, details.clone()))
    }

    async fn list_communications(
        &self,
        ticket_name: &str,
        _top: Option<u32>,
        _filter: Option<&str>,
    ) -> Result<Vec<Communication>, SupportError> {
        self.record(
            Call::ListCommunications(ticket_name.to_string()),
            "list_communications",
        )?;
        Ok(Vec::new())
    }
}
