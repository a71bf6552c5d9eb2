//! Candidate names for new tickets and communications.

use chrono::NaiveDate;
use rand::Rng;

/// Prefix of every ticket name the demo creates.
pub const TICKET_NAME_PREFIX: &str = "ApiDemoConsoleApp";

/// Upper bound on name availability checks for one ticket.
pub const MAX_NAME_ATTEMPTS: u32 = 10;

/// Exclusive upper bound of the random suffix (six digits).
const SUFFIX_RANGE: u32 = 1_000_000;

/// `ApiDemoConsoleApp_{d}_{M}_{yy}_{suffix}`, suffix zero-padded to six digits.
pub fn ticket_name(date: NaiveDate, suffix: u32) -> String {
    format!(
        "{}_{}_{:06}",
        TICKET_NAME_PREFIX,
        date.format("%-d_%-m_%y"),
        suffix % SUFFIX_RANGE
    )
}

/// A fresh candidate for today's date.
pub fn random_ticket_name() -> String {
    let suffix = rand::rng().random_range(0..SUFFIX_RANGE);
    ticket_name(chrono::Local::now().date_naive(), suffix)
}

/// Name of the single communication the demo posts on a ticket.
pub fn communication_name(ticket_name: &str) -> String {
    format!("{}_communication", ticket_name)
}
