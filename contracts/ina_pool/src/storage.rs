//! # Storage
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key      | Type         | Description                   |
//! |----------|--------------|-------------------------------|
//! | `Config` | `PoolConfig` | Immutable campaign terms      |
//! | `State`  | `PoolState`  | Totals and terminal latches   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                | Type           | Description                          |
//! |--------------------|----------------|--------------------------------------|
//! | `Investors`        | `Vec<Address>` | Every address that ever deposited    |
//! | `IsInvestor(addr)` | `bool`         | Membership flag for `Investors`      |
//! | `Investment(addr)` | `i128`         | Cumulative gross deposit             |
//! | `Shares(addr)`     | `i128`         | Non-transferable share balance       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Shares have no transfer path: the only writers are `mint_shares` and
//! `burn_all_shares`, both of which keep `PoolState::total_shares` in step.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Pool, PoolConfig, PoolState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    State,
    Investors,
    IsInvestor(Address),
    Investment(Address),
    Shares(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> Result<PoolConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn load_state(env: &Env) -> Result<PoolState, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

pub fn save_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

/// Load config and state together.
pub fn load_pool_pair(env: &Env) -> Result<(PoolConfig, PoolState), Error> {
    Ok((load_config(env)?, load_state(env)?))
}

pub fn load_pool(env: &Env) -> Result<Pool, Error> {
    let (config, state) = load_pool_pair(env)?;
    Ok(Pool {
        registry: config.registry,
        asset: config.asset,
        terms: config.terms,
        total_shares: state.total_shares,
        total_invested: state.total_invested,
        repayment_amount: state.repayment_amount,
        funds_taken: state.funds_taken,
        repaid: state.repaid,
        refunded: state.refunded,
        investor_count: get_investors(env).len(),
    })
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn get_amount(env: &Env, key: &DataKey) -> i128 {
    let amount: Option<i128> = env.storage().persistent().get(key);
    match amount {
        Some(amount) => {
            bump_persistent(env, key);
            amount
        }
        None => 0,
    }
}

fn set_amount(env: &Env, key: &DataKey, amount: i128) {
    env.storage().persistent().set(key, &amount);
    bump_persistent(env, key);
}

pub fn get_investors(env: &Env) -> Vec<Address> {
    let investors: Option<Vec<Address>> = env.storage().persistent().get(&DataKey::Investors);
    match investors {
        Some(investors) => {
            bump_persistent(env, &DataKey::Investors);
            investors
        }
        None => Vec::new(env),
    }
}

pub fn is_investor(env: &Env, investor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::IsInvestor(investor.clone()))
        .unwrap_or(false)
}

/// Append `investor` to the investor list unless already present.
pub fn add_investor(env: &Env, investor: &Address) {
    if is_investor(env, investor) {
        return;
    }
    let mut investors = get_investors(env);
    investors.push_back(investor.clone());
    env.storage().persistent().set(&DataKey::Investors, &investors);
    bump_persistent(env, &DataKey::Investors);

    let flag = DataKey::IsInvestor(investor.clone());
    env.storage().persistent().set(&flag, &true);
    bump_persistent(env, &flag);
}

pub fn get_investment(env: &Env, investor: &Address) -> i128 {
    get_amount(env, &DataKey::Investment(investor.clone()))
}

pub fn set_investment(env: &Env, investor: &Address, amount: i128) {
    set_amount(env, &DataKey::Investment(investor.clone()), amount);
}

pub fn get_shares(env: &Env, investor: &Address) -> i128 {
    get_amount(env, &DataKey::Shares(investor.clone()))
}

/// Credit `shares` to `investor` and to the running total.
pub fn mint_shares(
    env: &Env,
    state: &mut PoolState,
    investor: &Address,
    shares: i128,
) -> Result<(), Error> {
    let balance = get_shares(env, investor)
        .checked_add(shares)
        .ok_or(Error::Overflow)?;
    state.total_shares = state
        .total_shares
        .checked_add(shares)
        .ok_or(Error::Overflow)?;
    set_amount(env, &DataKey::Shares(investor.clone()), balance);
    Ok(())
}

/// Zero `investor`'s share balance and return what it held.
pub fn burn_all_shares(env: &Env, state: &mut PoolState, investor: &Address) -> i128 {
    let shares = get_shares(env, investor);
    if shares != 0 {
        state.total_shares -= shares;
        set_amount(env, &DataKey::Shares(investor.clone()), 0);
    }
    shares
}
