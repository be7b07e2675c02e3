//! Soroban RPC client: polls `getEvents` and decodes Ina events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use stellar_xdr::curr::ScVal;
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::config::IDS_PER_FILTER;
use crate::events::{EventKind, InaEvent};
use crate::scval;

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Base64 XDR `ScVal` per topic
    pub topic: Vec<String>,
    /// Base64 XDR `ScVal` event data
    pub value: String,
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
}

/// One page of `getEvents` output.
#[derive(Debug)]
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events emitted by any of `contract_ids`.
///
/// * `start_ledger`: the ledger sequence to scan from (inclusive); ignored
///   when `cursor` is given.
/// * `cursor`: optional opaque pagination cursor from a previous page.
/// * `limit`: maximum number of events to return.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventsPage> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let params = build_params(contract_ids, start_ledger, cursor, limit);

    loop {
        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        let resp = match response {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                backoff = sleep_and_grow(backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            // Invalid request / unknown method will not fix themselves.
            if err.code == -32600 || err.code == -32601 {
                return Err(IndexerError::Rpc(format!(
                    "hard error {}: {}",
                    err.code, err.message
                )));
            }
            warn!(
                "RPC soft error (will retry in {backoff}s): {} {}",
                err.code, err.message
            );
            backoff = sleep_and_grow(backoff).await;
            continue;
        }

        let result = body
            .result
            .ok_or_else(|| IndexerError::Rpc("empty result from getEvents".to_string()))?;

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

async fn sleep_and_grow(backoff: u64) -> u64 {
    tokio::time::sleep(Duration::from_secs(backoff)).await;
    (backoff * 2).min(MAX_BACKOFF_SECS)
}

fn build_params(
    contract_ids: &[String],
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Value {
    let filters: Vec<Value> = contract_ids
        .chunks(IDS_PER_FILTER)
        .map(|ids| json!({ "type": "contract", "contractIds": ids }))
        .collect();

    let mut params = json!({
        "filters": filters,
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "base64"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Fields pulled out of an event's data payload.
#[derive(Debug, Default, PartialEq, Eq)]
struct EventData {
    actor: Option<String>,
    amount: Option<String>,
    shares: Option<String>,
    fee: Option<String>,
}

/// Decode raw RPC events into [`InaEvent`]s.
///
/// Events from failed contract calls, and events whose topics are not valid
/// XDR, are dropped.
pub fn decode_events(raw: &[RawEvent]) -> Vec<InaEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(decode_single)
        .collect()
}

fn decode_single(raw: &RawEvent) -> Option<InaEvent> {
    let contract_id = raw.contract_id.clone()?;

    let topics = match raw
        .topic
        .iter()
        .map(|t| scval::decode(t))
        .collect::<Result<Vec<_>>>()
    {
        Ok(topics) => topics,
        Err(e) => {
            warn!("Skipping event {:?} with undecodable topics: {e}", raw.id);
            return None;
        }
    };
    let kind = scval::symbol(topics.first()?)
        .map(|s| EventKind::from_topic(&s))
        .unwrap_or(EventKind::Unknown);

    // A bad payload still leaves the event's kind and subject worth keeping.
    let value = scval::decode(&raw.value).unwrap_or_else(|e| {
        warn!("Event {:?} has undecodable data: {e}", raw.id);
        ScVal::Void
    });

    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);
    let data = decode_data(&value, kind);

    Some(InaEvent {
        event_id: raw.id.clone(),
        event_type: kind.as_str().to_string(),
        contract_id,
        subject: topics.get(1).and_then(scval::render),
        actor: data.actor,
        amount: data.amount,
        shares: data.shares,
        fee: data.fee,
        ledger: raw.ledger.unwrap_or(0) as i64,
        timestamp,
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pick the fields each event kind carries out of its data struct.
fn decode_data(value: &ScVal, kind: EventKind) -> EventData {
    let get = |name: &str| scval::field(value, name).and_then(scval::render);

    match kind {
        EventKind::Deposited | EventKind::Refunded | EventKind::PaidOut => EventData {
            actor: get("investor"),
            amount: get("amount"),
            shares: get("shares"),
            fee: None,
        },
        EventKind::FundsTaken => EventData {
            actor: get("facilitator"),
            amount: get("principal"),
            shares: None,
            fee: get("fee"),
        },
        EventKind::Repaid => EventData {
            actor: get("facilitator"),
            amount: get("amount"),
            ..EventData::default()
        },
        EventKind::PoolInitialized | EventKind::PoolRecorded => EventData {
            actor: get("operator"),
            ..EventData::default()
        },
        EventKind::RoleSet
        | EventKind::RoleDel
        | EventKind::FeeReceiverSet
        | EventKind::KycWalletSet
        | EventKind::KycRevoked => EventData {
            actor: get("by"),
            ..EventData::default()
        },
        EventKind::KycIssued => EventData {
            actor: get("wallet"),
            ..EventData::default()
        },
        EventKind::Attested | EventKind::AttestationRevoked => EventData {
            actor: get("attester"),
            ..EventData::default()
        },
        EventKind::Unknown => EventData::default(),
    }
}

/// Parse an RFC 3339 timestamp into Unix seconds.
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
