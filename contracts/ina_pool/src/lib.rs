//! # Ina Investment Pool
//!
//! One contract instance runs one fundraising campaign: it admits
//! KYC-attested investors during a fixed window, then follows exactly one
//! terminal path once the window has closed.
//!
//! | Phase          | Entry Point(s)                                  | Caller             |
//! |----------------|-------------------------------------------------|--------------------|
//! | Bootstrap      | [`InaPool::initialize`]                         | registry operator  |
//! | Raising        | [`InaPool::deposit`]                            | attested investor  |
//! | Failed raise   | [`InaPool::refund`]                             | anyone             |
//! | Funded raise   | [`InaPool::take_funds`], then [`InaPool::repay`]| credit facilitator |
//! | Queries        | `calculate_repayment_amount`, `get_pool`, `status`, `investment_of`, `shares_of`, `investors` | anyone |
//!
//! ## Custody and latches
//!
//! The pool's balance of its asset is the only value it holds. Every
//! operation that pays out of it sets its terminal latch (`refunded`,
//! `funds_taken`, `repaid`) and persists it *before* the first outgoing
//! transfer, so a recipient that calls back into the pool mid-transfer
//! finds the operation already closed.
//!
//! ## Scaling
//!
//! `refund` and `repay` sweep every investor in a single invocation. The
//! investor count of a pool is therefore bounded by the host's per-call
//! resource limits; campaigns are expected to stay well inside them.
//!
//! Admission control lives in [`kyc`], arithmetic in [`math`], storage in
//! [`storage`].

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, BytesN, Env, Vec};

pub mod events;
mod kyc;
mod math;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_kyc;
#[cfg(test)]
mod testutils;

use ina_common::{RegistryClient, Role};
pub use types::{Pool, PoolConfig, PoolState, PoolStatus, PoolTerms};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidTerms = 3,
    NotAuthorized = 4,
    InvalidAmount = 5,
    Overflow = 6,

    // Deposit
    InvestmentPeriodClosed = 10,
    InvestmentCapExceeded = 11,
    ZeroShares = 12,

    // Admission control
    AttestationNotFound = 20,
    AttestationRevoked = 21,
    AttestationExpired = 22,
    InvalidAttester = 23,
    MalformedAttestation = 24,
    InvalidKycLevel = 25,
    AttestationMismatch = 26,

    // Settlement
    InvestmentPeriodNotEnded = 30,
    ThresholdReached = 31,
    ThresholdNotReached = 32,
    AlreadyRefunded = 33,
    FundsAlreadyTaken = 34,
    FundsNotTaken = 35,
    RepaymentNotDue = 36,
    AlreadyRepaid = 37,
    NotCreditFacilitator = 38,
    InvalidFee = 39,
}

#[contract]
pub struct InaPool;

#[contractimpl]
impl InaPool {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Fix the pool's terms. Callable once.
    ///
    /// `operator` must hold `Operator` (or `Admin`) in `registry`. Terms must
    /// satisfy `start_time < end_time`, `term > 0`, `threshold > 0` and
    /// `threshold <= amount_to_raise`.
    pub fn initialize(
        env: Env,
        operator: Address,
        registry: Address,
        asset: Address,
        terms: PoolTerms,
    ) -> Result<(), Error> {
        operator.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        if terms.start_time >= terms.end_time
            || terms.term == 0
            || terms.threshold <= 0
            || terms.amount_to_raise < terms.threshold
        {
            return Err(Error::InvalidTerms);
        }

        let registry_client = RegistryClient::new(&env, &registry);
        if !registry_client.has_role(&operator, &Role::Operator)
            && !registry_client.has_role(&operator, &Role::Admin)
        {
            return Err(Error::NotAuthorized);
        }

        storage::save_config(
            &env,
            &PoolConfig {
                registry: registry.clone(),
                asset: asset.clone(),
                terms,
            },
        );
        storage::save_state(&env, &PoolState::default());

        events::emit_initialized(&env, registry, asset, operator);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Raising
    // ─────────────────────────────────────────────────────────

    /// Invest `amount` of the pool asset and return the shares minted.
    ///
    /// `attestation_uid` must resolve to a live KYC claim for `investor`
    /// (see [`kyc`]). The first deposit mints shares 1:1; later deposits
    /// are priced against the pool's current asset balance.
    pub fn deposit(
        env: Env,
        investor: Address,
        amount: i128,
        attestation_uid: BytesN<32>,
    ) -> Result<i128, Error> {
        investor.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let (config, mut state) = storage::load_pool_pair(&env)?;

        let now = env.ledger().timestamp();
        if now < config.terms.start_time || now > config.terms.end_time {
            return Err(Error::InvestmentPeriodClosed);
        }

        let raised = state
            .total_invested
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if raised > config.terms.amount_to_raise {
            return Err(Error::InvestmentCapExceeded);
        }

        let claim = kyc::check_admission(&env, &config, &investor, &attestation_uid)?;

        let token_client = token::Client::new(&env, &config.asset);
        let pool_address = env.current_contract_address();
        let held = token_client.balance(&pool_address);
        let shares = math::shares_for_deposit(amount, state.total_shares, held)?;
        if shares <= 0 {
            return Err(Error::ZeroShares);
        }

        token_client.transfer(&investor, &pool_address, &amount);

        storage::mint_shares(&env, &mut state, &investor, shares)?;
        let investment = storage::get_investment(&env, &investor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::set_investment(&env, &investor, investment);
        storage::add_investor(&env, &investor);
        state.total_invested = raised;
        storage::save_state(&env, &state);

        events::emit_deposited(&env, investor, amount, shares, claim.kyc_id);
        Ok(shares)
    }

    // ─────────────────────────────────────────────────────────
    // Failed raise
    // ─────────────────────────────────────────────────────────

    /// Return every investor's gross deposit after a raise that closed
    /// below the threshold. Anyone may trigger it.
    ///
    /// Returns the number of investors refunded.
    pub fn refund(env: Env) -> Result<u32, Error> {
        let (config, mut state) = storage::load_pool_pair(&env)?;

        if env.ledger().timestamp() <= config.terms.end_time {
            return Err(Error::InvestmentPeriodNotEnded);
        }
        if state.refunded {
            return Err(Error::AlreadyRefunded);
        }
        if state.funds_taken {
            return Err(Error::FundsAlreadyTaken);
        }
        if state.total_invested >= config.terms.threshold {
            return Err(Error::ThresholdReached);
        }

        state.refunded = true;
        storage::save_state(&env, &state);

        let token_client = token::Client::new(&env, &config.asset);
        let pool_address = env.current_contract_address();
        let mut refunded = 0u32;

        for investor in storage::get_investors(&env).iter() {
            let investment = storage::get_investment(&env, &investor);
            if investment == 0 || storage::get_shares(&env, &investor) == 0 {
                continue;
            }

            storage::set_investment(&env, &investor, 0);
            let shares = storage::burn_all_shares(&env, &mut state, &investor);

            token_client.transfer(&pool_address, &investor, &investment);
            events::emit_refunded(&env, investor, investment, shares);
            refunded += 1;
        }
        storage::save_state(&env, &state);

        Ok(refunded)
    }

    // ─────────────────────────────────────────────────────────
    // Funded raise
    // ─────────────────────────────────────────────────────────

    /// Release everything the pool holds: the platform fee to the
    /// registry's fee receiver and the remainder to the credit facilitator.
    ///
    /// The fee is floored, so rounding favours the facilitator. Fee basis
    /// points above 10 000 are accepted at `initialize` but make the fee
    /// exceed the balance, and the release fails with `InvalidFee`.
    /// Returns the fee.
    pub fn take_funds(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let (config, mut state) = storage::load_pool_pair(&env)?;

        if caller != config.terms.credit_facilitator {
            return Err(Error::NotCreditFacilitator);
        }
        if env.ledger().timestamp() <= config.terms.end_time {
            return Err(Error::InvestmentPeriodNotEnded);
        }
        if state.funds_taken {
            return Err(Error::FundsAlreadyTaken);
        }
        if state.refunded {
            return Err(Error::AlreadyRefunded);
        }
        if state.total_invested < config.terms.threshold {
            return Err(Error::ThresholdNotReached);
        }

        state.funds_taken = true;
        storage::save_state(&env, &state);

        let token_client = token::Client::new(&env, &config.asset);
        let pool_address = env.current_contract_address();
        let held = token_client.balance(&pool_address);
        let fee = math::apply_basis_points(held, config.terms.fee_basis_points)?;
        if fee > held {
            return Err(Error::InvalidFee);
        }
        let principal = held - fee;

        let fee_receiver = RegistryClient::new(&env, &config.registry).fee_receiver();
        if fee > 0 {
            token_client.transfer(&pool_address, &fee_receiver, &fee);
        }
        if principal > 0 {
            token_client.transfer(&pool_address, &caller, &principal);
        }

        events::emit_funds_taken(&env, caller, fee_receiver, fee, principal);
        Ok(fee)
    }

    /// Pull the repayment from the credit facilitator and distribute it to
    /// investors pro rata to their shares.
    ///
    /// The facilitator must have approved the pool for at least
    /// [`InaPool::calculate_repayment_amount`] beforehand. Floor rounding can
    /// leave up to `investors - 1` base units in the pool.
    /// Returns the repayment amount.
    pub fn repay(env: Env, caller: Address) -> Result<i128, Error> {
        caller.require_auth();
        let (config, mut state) = storage::load_pool_pair(&env)?;

        if caller != config.terms.credit_facilitator {
            return Err(Error::NotCreditFacilitator);
        }
        let due = config
            .terms
            .end_time
            .checked_add(config.terms.term)
            .ok_or(Error::Overflow)?;
        if env.ledger().timestamp() <= due {
            return Err(Error::RepaymentNotDue);
        }
        if !state.funds_taken {
            return Err(Error::FundsNotTaken);
        }
        if state.repaid {
            return Err(Error::AlreadyRepaid);
        }

        let repayment = math::repayment_amount(
            state.total_invested,
            config.terms.estimated_return_basis_points,
        )?;
        state.repaid = true;
        state.repayment_amount = repayment;
        storage::save_state(&env, &state);

        let token_client = token::Client::new(&env, &config.asset);
        let pool_address = env.current_contract_address();
        token_client.transfer_from(&pool_address, &caller, &pool_address, &repayment);
        events::emit_repaid(&env, caller, repayment);

        let total_shares = state.total_shares;
        for investor in storage::get_investors(&env).iter() {
            let shares = storage::get_shares(&env, &investor);
            if shares == 0 {
                continue;
            }

            let payout = math::payout_for_shares(shares, repayment, total_shares)?;
            storage::burn_all_shares(&env, &mut state, &investor);

            if payout > 0 {
                token_client.transfer(&pool_address, &investor, &payout);
            }
            events::emit_paid_out(&env, investor, shares, payout);
        }
        storage::save_state(&env, &state);

        Ok(repayment)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// `total_invested` plus the estimated return on it, as of now.
    pub fn calculate_repayment_amount(env: Env) -> Result<i128, Error> {
        let (config, state) = storage::load_pool_pair(&env)?;
        math::repayment_amount(
            state.total_invested,
            config.terms.estimated_return_basis_points,
        )
    }

    pub fn get_pool(env: Env) -> Result<Pool, Error> {
        storage::load_pool(&env)
    }

    pub fn status(env: Env) -> Result<PoolStatus, Error> {
        let (config, state) = storage::load_pool_pair(&env)?;
        Ok(state.status(&config.terms, env.ledger().timestamp()))
    }

    pub fn investment_of(env: Env, investor: Address) -> i128 {
        storage::get_investment(&env, &investor)
    }

    pub fn shares_of(env: Env, investor: Address) -> i128 {
        storage::get_shares(&env, &investor)
    }

    pub fn total_shares(env: Env) -> Result<i128, Error> {
        Ok(storage::load_state(&env)?.total_shares)
    }

    pub fn total_invested(env: Env) -> Result<i128, Error> {
        Ok(storage::load_state(&env)?.total_invested)
    }

    /// Every address that ever deposited, in first-deposit order.
    pub fn investors(env: Env) -> Vec<Address> {
        storage::get_investors(&env)
    }

    pub fn is_investor(env: Env, investor: Address) -> bool {
        storage::is_investor(&env, &investor)
    }
}
