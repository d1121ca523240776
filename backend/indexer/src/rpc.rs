//! Soroban RPC client: pages through `getEvents` and decodes FundMe events.
//!
//! ## Resilience
//!
//! * Transport errors, HTTP 429 and soft JSON-RPC errors are retried with
//!   exponential back-off capped at [`MAX_BACKOFF_SECS`].
//! * Invalid-request and method-not-found errors are returned immediately.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, FundMeEvent};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

/// JSON-RPC codes that retrying cannot fix.
const HARD_ERROR_CODES: [i64; 2] = [-32600, -32601];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<EventsResult>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct EventsResult {
    events: Vec<RawEvent>,
    cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Topic list, one decoded ScVal per entry.
    pub topic: Vec<String>,
    /// Decoded event data.
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

/// One page of `getEvents`.
#[derive(Debug)]
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    /// Opaque cursor to continue from, if the RPC returned one.
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────

/// Doubling delay between retries.
#[derive(Debug)]
struct Backoff {
    secs: u64,
}

impl Backoff {
    fn new() -> Self {
        Backoff {
            secs: INITIAL_BACKOFF_SECS,
        }
    }

    async fn wait(&mut self) {
        tokio::time::sleep(Duration::from_secs(self.secs)).await;
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
    }
}

pub struct RpcClient {
    http: Client,
    rpc_url: String,
    contract_id: String,
}

impl RpcClient {
    pub fn new(http: Client, rpc_url: impl Into<String>, contract_id: impl Into<String>) -> Self {
        RpcClient {
            http,
            rpc_url: rpc_url.into(),
            contract_id: contract_id.into(),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Fetch one page of contract events.
    ///
    /// With a `cursor` the RPC continues after it; otherwise it scans from
    /// `start_ledger` inclusive.
    pub async fn fetch_events(
        &self,
        start_ledger: u32,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<EventsPage> {
        let mut backoff = Backoff::new();
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getEvents",
            "params": build_params(&self.contract_id, start_ledger, cursor, limit),
        });

        loop {
            let response = match self.http.post(&self.rpc_url).json(&request).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!("RPC request failed (will retry in {}s): {e}", backoff.secs);
                    backoff.wait().await;
                    continue;
                }
            };

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                warn!("Rate-limited by RPC (will retry in {}s)", backoff.secs);
                backoff.wait().await;
                continue;
            }

            let body: RpcResponse = response.json().await?;

            if let Some(err) = body.error {
                if HARD_ERROR_CODES.contains(&err.code) {
                    return Err(IndexerError::Rpc {
                        code: err.code,
                        message: err.message,
                    });
                }
                warn!(
                    "RPC soft error (will retry in {}s): {} {}",
                    backoff.secs, err.code, err.message
                );
                backoff.wait().await;
                continue;
            }

            let result = body.result.ok_or_else(|| {
                IndexerError::EventParse("Empty result from getEvents".to_string())
            })?;

            debug!(
                "Fetched {} events (latest_ledger={:?})",
                result.events.len(),
                result.latest_ledger
            );

            return Ok(EventsPage {
                events: result.events,
                cursor: result.cursor,
                latest_ledger: result.latest_ledger,
            });
        }
    }
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    match cursor {
        Some(cur) => params["pagination"]["cursor"] = json!(cur),
        None => params["startLedger"] = json!(start_ledger),
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode raw RPC events into [`FundMeEvent`]s.
///
/// Events from failed invocations and events without a leading topic are
/// dropped.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<FundMeEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call.unwrap_or(true))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<FundMeEvent> {
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&topic_string(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let tx_hash = raw.tx_hash.clone();
    let event_id = raw
        .id
        .clone()
        .or_else(|| raw.paging_token.clone())
        .unwrap_or_else(|| {
            format!(
                "{ledger}-{}-{}",
                tx_hash.as_deref().unwrap_or("notx"),
                kind.as_str()
            )
        });

    // Actor sits in the second topic; the data struct repeats it.
    let topic_actor = raw.topic.get(1).map(|t| topic_string(t));
    let (actor, amount, funders) = match kind {
        EventKind::Funded => (
            data_field(&raw.value, "funder").or(topic_actor),
            data_field(&raw.value, "amount"),
            None,
        ),
        EventKind::Withdrawn => (
            data_field(&raw.value, "owner").or(topic_actor),
            data_field(&raw.value, "amount"),
            data_field(&raw.value, "funders").and_then(|n| n.parse().ok()),
        ),
        EventKind::Unknown => (topic_actor, None, None),
    };

    Some(FundMeEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        actor,
        amount,
        funders,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash,
    })
}

/// Read a named field from event data.
///
/// Accepts a flat JSON object (`{"amount": "5"}`) or an ScVal map
/// (`{"map": [{"key": {"symbol": "amount"}, "val": {"i128": "5"}}]}`).
fn data_field(value: &Value, name: &str) -> Option<String> {
    if let Some(v) = value.get(name) {
        return scalar_string(v);
    }
    value
        .get("map")
        .and_then(Value::as_array)?
        .iter()
        .find(|entry| {
            entry
                .get("key")
                .and_then(scalar_string)
                .is_some_and(|key| key == name)
        })
        .and_then(|entry| entry.get("val"))
        .and_then(scalar_string)
}

/// Flatten a decoded ScVal into a plain string.
///
/// Handles bare strings/numbers, single-key wrappers such as
/// `{"address": "G…"}` or `{"u32": 2}`, the `{"type": …, "value": …}` form,
/// and 128-bit `{"hi": …, "lo": …}` pairs.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => {
            if let (Some(hi), Some(lo)) = (map.get("hi"), map.get("lo")) {
                let hi = hi.as_i64()?;
                let lo = lo.as_u64()?;
                return Some((((hi as i128) << 64) | lo as i128).to_string());
            }
            if let Some(inner) = map.get("value") {
                return scalar_string(inner);
            }
            if map.len() == 1 {
                return map.values().next().and_then(scalar_string);
            }
            None
        }
        _ => None,
    }
}

/// Topic entries arrive as JSON text (`{"symbol":"funded"}`,
/// `{"type":"symbol","value":"funded"}`) or as the raw string.
fn topic_string(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| scalar_string(&v))
        .unwrap_or_else(|| raw.to_string())
}

fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
