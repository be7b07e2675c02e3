//! Canonical event types emitted by the Ina contracts.
//!
//! These mirror the events published from `contracts/ina_pool/src/events.rs`,
//! `contracts/ina_registry/src/events.rs` and
//! `contracts/attestation_oracle/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A pool fixed its terms (`init` topic).
    PoolInitialized,
    /// An investor deposited (`deposit` topic).
    Deposited,
    /// An investor was refunded after a failed raise (`refund` topic).
    Refunded,
    /// The facilitator drew down the raise (`taken` topic).
    FundsTaken,
    /// The facilitator repaid the pool (`repaid` topic).
    Repaid,
    /// An investor received its share of the repayment (`payout` topic).
    PaidOut,
    /// A registry role was granted (`role_set` topic).
    RoleSet,
    /// A registry role was revoked (`role_del` topic).
    RoleDel,
    /// The registry's fee receiver changed (`fee_rcv` topic).
    FeeReceiverSet,
    /// The registry's KYC wallet changed (`kyc_wal` topic).
    KycWalletSet,
    /// The registry issued a KYC claim (`kyc_add` topic).
    KycIssued,
    /// The registry revoked a KYC claim (`kyc_del` topic).
    KycRevoked,
    /// A pool was recorded in the registry (`pool_new` topic).
    PoolRecorded,
    /// The oracle stored an attestation (`attested` topic).
    Attested,
    /// The oracle revoked an attestation (`revoked` topic).
    AttestationRevoked,
    /// An event from a watched contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    pub const ALL: [EventKind; 16] = [
        Self::PoolInitialized,
        Self::Deposited,
        Self::Refunded,
        Self::FundsTaken,
        Self::Repaid,
        Self::PaidOut,
        Self::RoleSet,
        Self::RoleDel,
        Self::FeeReceiverSet,
        Self::KycWalletSet,
        Self::KycIssued,
        Self::KycRevoked,
        Self::PoolRecorded,
        Self::Attested,
        Self::AttestationRevoked,
        Self::Unknown,
    ];

    /// Parse the leading topic symbol into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::PoolInitialized,
            "deposit" => Self::Deposited,
            "refund" => Self::Refunded,
            "taken" => Self::FundsTaken,
            "repaid" => Self::Repaid,
            "payout" => Self::PaidOut,
            "role_set" => Self::RoleSet,
            "role_del" => Self::RoleDel,
            "fee_rcv" => Self::FeeReceiverSet,
            "kyc_wal" => Self::KycWalletSet,
            "kyc_add" => Self::KycIssued,
            "kyc_del" => Self::KycRevoked,
            "pool_new" => Self::PoolRecorded,
            "attested" => Self::Attested,
            "revoked" => Self::AttestationRevoked,
            _ => Self::Unknown,
        }
    }

    /// Identifier stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PoolInitialized => "pool_initialized",
            Self::Deposited => "deposited",
            Self::Refunded => "refunded",
            Self::FundsTaken => "funds_taken",
            Self::Repaid => "repaid",
            Self::PaidOut => "paid_out",
            Self::RoleSet => "role_set",
            Self::RoleDel => "role_del",
            Self::FeeReceiverSet => "fee_receiver_set",
            Self::KycWalletSet => "kyc_wallet_set",
            Self::KycIssued => "kyc_issued",
            Self::KycRevoked => "kyc_revoked",
            Self::PoolRecorded => "pool_recorded",
            Self::Attested => "attested",
            Self::AttestationRevoked => "attestation_revoked",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`], for rows read back from the database.
    pub fn from_stored(event_type: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == event_type)
            .unwrap_or(Self::Unknown)
    }
}

/// A decoded event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InaEvent {
    /// RPC-assigned event id, unique across the network.
    pub event_id: Option<String>,
    pub event_type: String,
    pub contract_id: String,
    /// Second topic, when present (usually the investor or account concerned).
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub shares: Option<String>,
    pub fee: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub tx_hash: Option<String>,
}

/// An event row as read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: Option<String>,
    pub event_type: String,
    pub contract_id: String,
    pub subject: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub shares: Option<String>,
    pub fee: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
