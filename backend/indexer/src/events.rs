//! Event types emitted by the FundMe contract and the records derived from
//! them.
//!
//! These mirror `contracts/fund_me/src/events.rs`:
//!
//! | Topics               | Data fields                  |
//! |----------------------|------------------------------|
//! | (`funded`, funder)   | `funder`, `amount`           |
//! | (`withdrawn`, owner) | `owner`, `amount`, `funders` |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the FundMe contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A contribution was accepted.
    Funded,
    /// The owner drained the contract.
    Withdrawn,
    /// An event from this contract that we don't recognise.
    Unknown,
}

impl EventKind {
    /// Map the leading topic symbol to an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "funded" => Self::Funded,
            "withdrawn" => Self::Withdrawn,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Funded => "funded",
            Self::Withdrawn => "withdrawn",
            Self::Unknown => "unknown",
        }
    }
}

/// A decoded event, ready to be stored.
///
/// `amount` stays a decimal string: contract amounts are `i128`, which SQLite
/// cannot hold as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundMeEvent {
    /// RPC event id; unique per contract event.
    pub event_id: String,
    pub event_type: String,
    /// Funder for `funded`, owner for `withdrawn`.
    pub actor: Option<String>,
    pub amount: Option<String>,
    /// Funder list length cleared by a `withdrawn` event.
    pub funders: Option<i64>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as read back from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub funders: Option<i64>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

impl EventRecord {
    fn kind(&self) -> EventKind {
        EventKind::from_topic(&self.event_type)
    }

    fn amount_value(&self) -> i128 {
        self.amount
            .as_deref()
            .and_then(|a| a.parse().ok())
            .unwrap_or(0)
    }
}

/// Aggregate view over the indexed history.
///
/// Amounts are decimal strings for the same reason as [`FundMeEvent::amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of every accepted contribution.
    pub total_funded: String,
    /// Sum of every withdrawal payout.
    pub total_withdrawn: String,
    /// Contributions since the most recent withdrawal.
    pub outstanding: String,
    pub withdrawals: u64,
    /// Distinct funders since the most recent withdrawal.
    pub current_funders: usize,
}

/// Fold events, in ledger order, into a [`Summary`].
pub fn summarize(events: &[EventRecord]) -> Summary {
    let mut total_funded: i128 = 0;
    let mut total_withdrawn: i128 = 0;
    let mut outstanding: i128 = 0;
    let mut withdrawals = 0u64;
    let mut current: HashSet<&str> = HashSet::new();

    for event in events {
        match event.kind() {
            EventKind::Funded => {
                let amount = event.amount_value();
                total_funded = total_funded.saturating_add(amount);
                outstanding = outstanding.saturating_add(amount);
                if let Some(funder) = event.actor.as_deref() {
                    current.insert(funder);
                }
            }
            EventKind::Withdrawn => {
                total_withdrawn = total_withdrawn.saturating_add(event.amount_value());
                withdrawals += 1;
                outstanding = 0;
                current.clear();
            }
            EventKind::Unknown => {}
        }
    }

    Summary {
        total_funded: total_funded.to_string(),
        total_withdrawn: total_withdrawn.to_string(),
        outstanding: outstanding.to_string(),
        withdrawals,
        current_funders: current.len(),
    }
}
