//! Per-pool aggregates computed from indexed events.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::errors::{IndexerError, Result};
use crate::events::{EventKind, EventRecord};

/// Furthest lifecycle step a pool's events show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolStage {
    Unknown,
    Initialized,
    Raising,
    Refunded,
    FundsTaken,
    Repaid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSummary {
    pub contract_id: String,
    pub stage: PoolStage,
    pub investor_count: usize,
    pub total_deposited: i128,
    pub total_refunded: i128,
    pub principal_taken: i128,
    pub fee_paid: i128,
    pub repaid: i128,
    pub total_paid_out: i128,
    pub last_ledger: i64,
}

impl PoolSummary {
    /// Fold a pool's events, in ledger order, into a summary.
    pub fn from_events(contract_id: &str, events: &[EventRecord]) -> Result<Self> {
        let mut summary = PoolSummary {
            contract_id: contract_id.to_string(),
            stage: PoolStage::Unknown,
            investor_count: 0,
            total_deposited: 0,
            total_refunded: 0,
            principal_taken: 0,
            fee_paid: 0,
            repaid: 0,
            total_paid_out: 0,
            last_ledger: 0,
        };
        let mut investors = BTreeSet::new();

        for ev in events.iter().filter(|e| e.contract_id == contract_id) {
            summary.last_ledger = summary.last_ledger.max(ev.ledger);
            match EventKind::from_stored(&ev.event_type) {
                EventKind::PoolInitialized => {
                    summary.stage = summary.stage.max_with(PoolStage::Initialized);
                }
                EventKind::Deposited => {
                    summary.total_deposited = add(summary.total_deposited, &ev.amount)?;
                    if let Some(investor) = &ev.actor {
                        investors.insert(investor.clone());
                    }
                    summary.stage = summary.stage.max_with(PoolStage::Raising);
                }
                EventKind::Refunded => {
                    summary.total_refunded = add(summary.total_refunded, &ev.amount)?;
                    summary.stage = summary.stage.max_with(PoolStage::Refunded);
                }
                EventKind::FundsTaken => {
                    summary.principal_taken = add(summary.principal_taken, &ev.amount)?;
                    summary.fee_paid = add(summary.fee_paid, &ev.fee)?;
                    summary.stage = summary.stage.max_with(PoolStage::FundsTaken);
                }
                EventKind::Repaid => {
                    summary.repaid = add(summary.repaid, &ev.amount)?;
                    summary.stage = summary.stage.max_with(PoolStage::Repaid);
                }
                EventKind::PaidOut => {
                    summary.total_paid_out = add(summary.total_paid_out, &ev.amount)?;
                }
                _ => {}
            }
        }

        summary.investor_count = investors.len();
        Ok(summary)
    }
}

impl PoolStage {
    fn rank(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Initialized => 1,
            Self::Raising => 2,
            Self::Refunded | Self::FundsTaken => 3,
            Self::Repaid => 4,
        }
    }

    fn max_with(self, other: Self) -> Self {
        if other.rank() >= self.rank() {
            other
        } else {
            self
        }
    }
}

fn add(total: i128, raw: &Option<String>) -> Result<i128> {
    let Some(raw) = raw else {
        return Ok(total);
    };
    let value: i128 = raw
        .trim()
        .parse()
        .map_err(|_| IndexerError::Amount(raw.clone()))?;
    total
        .checked_add(value)
        .ok_or_else(|| IndexerError::Amount(raw.clone()))
}
