//! # Storage
//!
//! | Key          | Tier       | Type           | Description                      |
//! |--------------|------------|----------------|----------------------------------|
//! | `Settings`   | Instance   | `Settings`     | Oracle, fee receiver, KYC wallet |
//! | `Pools`      | Persistent | `Vec<Address>` | Recorded pools, insertion order  |
//! | `Pool(addr)` | Persistent | `bool`         | Pool membership flag             |

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::Error;

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Settings,
    Pools,
    Pool(Address),
}

/// Registry-wide addresses, settable by admins after `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    pub attestation_oracle: Address,
    pub fee_receiver: Address,
    pub kyc_wallet: Address,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Settings)
}

pub fn set_settings(env: &Env, settings: &Settings) {
    env.storage().instance().set(&DataKey::Settings, settings);
    bump_instance(env);
}

pub fn get_settings(env: &Env) -> Result<Settings, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(Error::NotInitialized)
}

pub fn is_recorded_pool(env: &Env, pool: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Pool(pool.clone()))
        .unwrap_or(false)
}

pub fn push_pool(env: &Env, pool: &Address) {
    let mut pools = get_pools(env);
    pools.push_back(pool.clone());
    env.storage().persistent().set(&DataKey::Pools, &pools);
    bump_persistent(env, &DataKey::Pools);

    let flag = DataKey::Pool(pool.clone());
    env.storage().persistent().set(&flag, &true);
    bump_persistent(env, &flag);
}

pub fn get_pools(env: &Env) -> Vec<Address> {
    let pools: Option<Vec<Address>> = env.storage().persistent().get(&DataKey::Pools);
    match pools {
        Some(pools) => {
            bump_persistent(env, &DataKey::Pools);
            pools
        }
        None => Vec::new(env),
    }
}
