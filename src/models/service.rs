//! Service and problem classification models.
//!
//! Services are the top-level support categories (Billing, Compute, ...);
//! problem classifications are the issue types scoped to one service.

use serde::{Deserialize, Serialize};

use super::Resource;

/// Properties of a support service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProperties {
    /// Localized display name.
    #[serde(default)]
    pub display_name: String,

    /// ARM resource types this service covers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_types: Vec<String>,
}

/// Properties of a problem classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemClassificationProperties {
    /// Localized display name.
    #[serde(default)]
    pub display_name: String,
}

/// A support service.
pub type Service = Resource<ServiceProperties>;

/// A problem classification under a service.
pub type ProblemClassification = Resource<ProblemClassificationProperties>;

/// Anything that can be picked out of a list by its display name.
pub trait DisplayNamed {
    /// Human-readable name matched against.
    fn display_name(&self) -> &str;
}

impl DisplayNamed for Service {
    fn display_name(&self) -> &str {
        &self.properties.display_name
    }
}

impl DisplayNamed for ProblemClassification {
    fn display_name(&self) -> &str {
        &self.properties.display_name
    }
}

/// Returns the first item whose display name contains `needle`, ignoring case.
pub fn find_by_display_name<'a, T: DisplayNamed>(items: &'a [T], needle: &str) -> Option<&'a T> {
    let needle = needle.to_lowercase();
    items
        .iter()
        .find(|item| item.display_name().to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, display_name: &str) -> Service {
        Service {
            id: None,
            name: name.to_string(),
            resource_type: None,
            properties: ServiceProperties {
                display_name: display_name.to_string(),
                resource_types: vec![],
            },
        }
    }

    #[test]
    fn test_deserialize_service() {
        let json = r#"{
            "id": "/providers/Microsoft.Support/services/517f2da6-78fd-0498-4e22-ad26996b1dfc",
            "name": "517f2da6-78fd-0498-4e22-ad26996b1dfc",
            "type": "Microsoft.Support/services",
            "properties": {
                "displayName": "Billing",
                "resourceTypes": []
            }
        }"#;
        let svc: Service = serde_json::from_str(json).unwrap();
        assert_eq!(svc.name, "517f2da6-78fd-0498-4e22-ad26996b1dfc");
        assert_eq!(svc.display_name(), "Billing");
        assert_eq!(svc.resource_type.as_deref(), Some("Microsoft.Support/services"));
    }

    #[test]
    fn test_find_by_display_name_is_case_insensitive() {
        let services = vec![
            service("a", "Virtual Machine running Windows"),
            service("b", "Billing"),
            service("c", "Billing - Reservations"),
        ];
        let found = find_by_display_name(&services, "billing").unwrap();
        assert_eq!(found.name, "b");
    }

    #[test]
    fn test_find_by_display_name_no_match() {
        let services = vec![service("a", "Compute")];
        assert!(find_by_display_name(&services, "cosmos db").is_none());
    }
}
