//! # Types
//!
//! ## Config / State split
//!
//! A pool is stored as two entries:
//!
//! - [`PoolConfig`]: written once by `initialize`; never mutated.
//! - [`PoolState`]: the running totals and the three terminal latches.
//!
//! Per-investor balances live in their own entries (see `storage`).
//! The public API exposes the reconstructed [`Pool`] for convenience.
//!
//! ## Lifecycle
//!
//! [`PoolStatus`] is derived from the clock and the latches, never stored:
//!
//! ```text
//! Upcoming ──► Raising ──► Succeeded ──► FundsTaken ──► Repaid
//!                  └─────► Failed ─────► Refunded
//! ```

use soroban_sdk::{contracttype, Address};

/// Campaign terms supplied at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolTerms {
    /// First ledger timestamp at which deposits are accepted.
    pub start_time: u64,
    /// Last ledger timestamp at which deposits are accepted.
    pub end_time: u64,
    /// Minimum raised amount for the campaign to count as funded.
    pub threshold: i128,
    /// Hard cap on cumulative deposits.
    pub amount_to_raise: i128,
    /// Platform fee on released funds, in basis points.
    pub fee_basis_points: u32,
    /// Markup owed on top of principal at repayment, in basis points.
    pub estimated_return_basis_points: u32,
    /// Sole account allowed to take the funds and to repay.
    pub credit_facilitator: Address,
    /// Minimum KYC level an investor must hold.
    pub kyc_level: u32,
    /// Seconds after `end_time` before repayment is due.
    pub term: u64,
}

/// Immutable pool configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub registry: Address,
    pub asset: Address,
    pub terms: PoolTerms,
}

/// Mutable pool state.
///
/// `funds_taken`, `repaid` and `refunded` are one-way latches.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    pub total_shares: i128,
    /// Sum of gross deposits; never decreases.
    pub total_invested: i128,
    /// Set once, by `repay`.
    pub repayment_amount: i128,
    pub funds_taken: bool,
    pub repaid: bool,
    pub refunded: bool,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolStatus {
    /// Before `start_time`.
    Upcoming,
    /// Accepting deposits.
    Raising,
    /// Window closed with the threshold met; awaiting `take_funds`.
    Succeeded,
    /// Window closed below the threshold; awaiting `refund`.
    Failed,
    Refunded,
    /// Principal is with the credit facilitator.
    FundsTaken,
    Repaid,
}

/// Full view of a pool, reconstructed from config and state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub registry: Address,
    pub asset: Address,
    pub terms: PoolTerms,
    pub total_shares: i128,
    pub total_invested: i128,
    pub repayment_amount: i128,
    pub funds_taken: bool,
    pub repaid: bool,
    pub refunded: bool,
    pub investor_count: u32,
}

impl PoolState {
    pub fn status(&self, terms: &PoolTerms, now: u64) -> PoolStatus {
        if self.repaid {
            PoolStatus::Repaid
        } else if self.funds_taken {
            PoolStatus::FundsTaken
        } else if self.refunded {
            PoolStatus::Refunded
        } else if now < terms.start_time {
            PoolStatus::Upcoming
        } else if now <= terms.end_time {
            PoolStatus::Raising
        } else if self.total_invested >= terms.threshold {
            PoolStatus::Succeeded
        } else {
            PoolStatus::Failed
        }
    }
}
