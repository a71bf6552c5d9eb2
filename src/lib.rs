//! # support-console
//!
//! A console demo for the Azure Support ticket management REST API
//! (`Microsoft.Support`, api-version `2020-04-01`).
//!
//! It walks through the operations the API offers: listing services and
//! problem classifications, checking name availability, creating support
//! tickets, adding communications, and updating severity, status and contact
//! details.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error type with token redaction helpers
//! - [`credentials`] - Bearer token attachment
//! - [`api`] - The `SupportApi` trait workflows are written against
//! - [`support_client`] - HTTP implementation of `SupportApi`
//! - [`models`] - Request and response types
//! - [`workflow`] - The demo scenarios and the steps they are built from
//! - [`menu`] - Interactive numbered menu
//!
//! ## Configuration
//!
//! - `SUPPORT_SUBSCRIPTION_ID`: subscription to file tickets against (required)
//! - `SUPPORT_AUTH_TOKEN`: bearer token for `https://management.azure.com/`
//! - `SUPPORT_API_BASE_URL`: management endpoint override
//! - `RUST_LOG`: log level (e.g., `support_console=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use support_console::config::Config;
//! use support_console::support_client::SupportClient;
//! use support_console::workflow::{Scenario, Workflow};
//!
//! async fn example() -> Result<(), support_console::error::SupportError> {
//!     let config = Config::from_env()?;
//!     let client = SupportClient::new(&config)?;
//!
//!     let mut workflow = Workflow::new(client, std::io::stdout());
//!     workflow.run(Scenario::BillingRefund).await
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod menu;
pub mod models;
pub mod support_client;
pub mod workflow;
