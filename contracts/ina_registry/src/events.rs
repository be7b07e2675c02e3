//! Events published by the registry.
//!
//! | Topic                       | Data             |
//! |-----------------------------|------------------|
//! | `("role_set", account)`     | `RoleChanged`    |
//! | `("role_del", account)`     | `RoleChanged`    |
//! | `("fee_rcv",)`              | `SettingChanged` |
//! | `("kyc_wal",)`              | `SettingChanged` |
//! | `("kyc_add", wallet)`       | `KycIssued`      |
//! | `("kyc_del",)`              | `KycRevoked`     |
//! | `("pool_new", pool)`        | `PoolRecorded`   |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::Role;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChanged {
    pub account: Address,
    pub role: Role,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettingChanged {
    pub address: Address,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KycIssued {
    pub wallet: Address,
    pub uid: BytesN<32>,
    pub kyc_level: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KycRevoked {
    pub uid: BytesN<32>,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRecorded {
    pub pool: Address,
    pub operator: Address,
}

pub fn emit_role_set(env: &Env, account: Address, role: Role, by: Address) {
    env.events().publish(
        (symbol_short!("role_set"), account.clone()),
        RoleChanged { account, role, by },
    );
}

pub fn emit_role_del(env: &Env, account: Address, role: Role, by: Address) {
    env.events().publish(
        (symbol_short!("role_del"), account.clone()),
        RoleChanged { account, role, by },
    );
}

pub fn emit_fee_receiver_set(env: &Env, address: Address, by: Address) {
    env.events()
        .publish((symbol_short!("fee_rcv"),), SettingChanged { address, by });
}

pub fn emit_kyc_wallet_set(env: &Env, address: Address, by: Address) {
    env.events()
        .publish((symbol_short!("kyc_wal"),), SettingChanged { address, by });
}

pub fn emit_kyc_issued(env: &Env, wallet: Address, uid: BytesN<32>, kyc_level: u32) {
    env.events().publish(
        (symbol_short!("kyc_add"), wallet.clone()),
        KycIssued {
            wallet,
            uid,
            kyc_level,
        },
    );
}

pub fn emit_kyc_revoked(env: &Env, uid: BytesN<32>, by: Address) {
    env.events()
        .publish((symbol_short!("kyc_del"),), KycRevoked { uid, by });
}

pub fn emit_pool_recorded(env: &Env, pool: Address, operator: Address) {
    env.events().publish(
        (symbol_short!("pool_new"), pool.clone()),
        PoolRecorded { pool, operator },
    );
}
