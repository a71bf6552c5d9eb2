//! support-console - interactive demo of the Azure Support ticket API
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `SUPPORT_SUBSCRIPTION_ID`: subscription to file tickets against
//! - `SUPPORT_AUTH_TOKEN`: bearer token for the management endpoint
//!
//! # Usage
//!
//! ```bash
//! SUPPORT_SUBSCRIPTION_ID=... SUPPORT_AUTH_TOKEN=$(az account get-access-token --query accessToken -o tsv) \
//!     ./support-console
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use support_console::{config, menu, support_client, workflow};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout is for the menu and JSON output, logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("support_console=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting support-console v{}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    let client =
        support_client::SupportClient::new(&config).context("Failed to create support client")?;

    if client.has_credentials() {
        if let Err(e) = client.test_connection().await {
            tracing::warn!(
                error = %client.sanitize_error(&e),
                "Connection test failed, scenarios will probably fail too"
            );
        }
    } else {
        tracing::warn!("SUPPORT_AUTH_TOKEN is not set, every API call will be refused");
    }

    let subscription_id = client.subscription_id().to_string();
    let mut workflow = workflow::Workflow::new(client, std::io::stdout());

    println!("\n{}\n", menu::welcome());

    menu::run_menu(
        &mut workflow,
        &subscription_id,
        tokio::io::BufReader::new(tokio::io::stdin()),
    )
    .await
    .context("Menu I/O failed")?;

    tracing::info!("Exiting");

    Ok(())
}
