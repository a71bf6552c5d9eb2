//! Interactive numbered menu.
//!
//! Reads one choice per line, runs the matching [`Scenario`], and keeps
//! going until the operator picks "Exit" or input ends. A failing scenario
//! is reported and the menu is shown again.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::api::SupportApi;
use crate::error::SupportError;
use crate::workflow::{Scenario, Workflow};

/// Printed before the error of a failed scenario.
pub const ERROR_MESSAGE: &str =
    "Some error occurred! Please file a github issue if you think there is an issue with the original code.";

/// Menu number of the exit option.
const EXIT_NUMBER: usize = Scenario::ALL.len() + 1;

/// What a line of operator input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Run a scenario.
    Run(Scenario),
    /// Leave the menu.
    Exit,
    /// Anything else; the menu is shown again.
    Invalid,
}

impl MenuChoice {
    /// Parses one line of input.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("exit") {
            return MenuChoice::Exit;
        }

        match line.parse::<usize>() {
            Ok(EXIT_NUMBER) => MenuChoice::Exit,
            Ok(n) => Scenario::from_number(n).map_or(MenuChoice::Invalid, MenuChoice::Run),
            Err(_) => MenuChoice::Invalid,
        }
    }
}

/// Greeting shown once at startup.
pub fn welcome() -> &'static str {
    "Welcome to the Azure Support sample console app. \
     Make sure SUPPORT_AUTH_TOKEN and SUPPORT_SUBSCRIPTION_ID are set before running a scenario!"
}

/// Renders the option list for `subscription_id`.
pub fn render_menu(subscription_id: &str) -> String {
    let mut output = String::new();
    output.push_str("\n=== Create and manage support tickets using Support API ===\n");
    output.push_str("===========================================================\n\n");

    for scenario in Scenario::ALL {
        output.push_str(&format!(
            "{}. {} for the subscription {}\n",
            scenario.number(),
            scenario.title(),
            subscription_id
        ));
    }
    output.push_str(&format!("{}. Exit\n\n", EXIT_NUMBER));
    output.push_str(&format!("Enter your choice (1-{}): ", EXIT_NUMBER));
    output
}

/// Runs the menu loop until exit or end of input.
///
/// # Errors
///
/// Only I/O errors on the input or output end the loop early; scenario
/// failures are printed and the loop continues.
pub async fn run_menu<A, W, R>(
    workflow: &mut Workflow<A, W>,
    subscription_id: &str,
    input: R,
) -> Result<(), SupportError>
where
    A: SupportApi,
    W: Write,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        write!(workflow.out(), "{}", render_menu(subscription_id))?;
        workflow.out().flush()?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("Input closed, leaving menu");
            writeln!(workflow.out())?;
            return Ok(());
        };
        writeln!(workflow.out())?;

        match MenuChoice::parse(&line) {
            MenuChoice::Exit => return Ok(()),
            MenuChoice::Invalid => {
                tracing::debug!(input = %line.trim(), "Ignoring invalid menu choice");
            }
            MenuChoice::Run(scenario) => {
                if let Err(e) = workflow.run(scenario).await {
                    tracing::error!(
                        scenario = scenario.title(),
                        error = %e,
                        "Scenario failed"
                    );
                    writeln!(workflow.out(), "\n{}", ERROR_MESSAGE)?;
                    writeln!(workflow.out(), "{}", e)?;
                }
            }
        }
    }
}
