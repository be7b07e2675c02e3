//! Events published by an investment pool.
//!
//! | Topic                     | Data          |
//! |---------------------------|---------------|
//! | `("init", registry)`      | `Initialized` |
//! | `("deposit", investor)`   | `Deposited`   |
//! | `("refund", investor)`    | `Refunded`    |
//! | `("taken", facilitator)`  | `FundsTaken`  |
//! | `("repaid", facilitator)` | `Repaid`      |
//! | `("payout", investor)`    | `PaidOut`     |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    pub registry: Address,
    pub asset: Address,
    pub operator: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposited {
    pub investor: Address,
    pub amount: i128,
    pub shares: i128,
    pub kyc_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refunded {
    pub investor: Address,
    pub amount: i128,
    pub shares: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsTaken {
    pub facilitator: Address,
    pub fee_receiver: Address,
    pub fee: i128,
    pub principal: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Repaid {
    pub facilitator: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaidOut {
    pub investor: Address,
    pub shares: i128,
    pub amount: i128,
}

pub fn emit_initialized(env: &Env, registry: Address, asset: Address, operator: Address) {
    env.events().publish(
        (symbol_short!("init"), registry.clone()),
        Initialized {
            registry,
            asset,
            operator,
        },
    );
}

pub fn emit_deposited(env: &Env, investor: Address, amount: i128, shares: i128, kyc_id: u64) {
    env.events().publish(
        (symbol_short!("deposit"), investor.clone()),
        Deposited {
            investor,
            amount,
            shares,
            kyc_id,
        },
    );
}

pub fn emit_refunded(env: &Env, investor: Address, amount: i128, shares: i128) {
    env.events().publish(
        (symbol_short!("refund"), investor.clone()),
        Refunded {
            investor,
            amount,
            shares,
        },
    );
}

pub fn emit_funds_taken(
    env: &Env,
    facilitator: Address,
    fee_receiver: Address,
    fee: i128,
    principal: i128,
) {
    env.events().publish(
        (symbol_short!("taken"), facilitator.clone()),
        FundsTaken {
            facilitator,
            fee_receiver,
            fee,
            principal,
        },
    );
}

pub fn emit_repaid(env: &Env, facilitator: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("repaid"), facilitator.clone()),
        Repaid {
            facilitator,
            amount,
        },
    );
}

pub fn emit_paid_out(env: &Env, investor: Address, shares: i128, amount: i128) {
    env.events().publish(
        (symbol_short!("payout"), investor.clone()),
        PaidOut {
            investor,
            shares,
            amount,
        },
    );
}
