//! # Storage
//!
//! | Key                | Tier       | Type          |
//! |--------------------|------------|---------------|
//! | `Nonce`            | Instance   | `u64`         |
//! | `Attestation(uid)` | Persistent | `Attestation` |
//!
//! Instance TTL is bumped by 7 days when below 1 day remaining; attestation
//! entries by 30 days when below 7 days remaining.

use soroban_sdk::{contracttype, BytesN, Env};

use ina_common::Attestation;

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Nonce,
    Attestation(BytesN<32>),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Returns the current nonce and stores its successor.
pub fn next_nonce(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::Nonce)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::Nonce, &(current + 1));
    current
}

pub fn save_attestation(env: &Env, attestation: &Attestation) {
    let key = DataKey::Attestation(attestation.uid.clone());
    env.storage().persistent().set(&key, attestation);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn load_attestation(env: &Env, uid: &BytesN<32>) -> Option<Attestation> {
    let key = DataKey::Attestation(uid.clone());
    let attestation: Option<Attestation> = env.storage().persistent().get(&key);
    if attestation.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    attestation
}
