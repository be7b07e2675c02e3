//! # Role-Based Access Control
//!
//! Each account holds a *set* of [`Role`]s, stored as one boolean entry per
//! `(account, role)` pair. There is no implicit hierarchy: an admin that
//! wants to issue KYC claims must also be granted `Attester`.
//!
//! Rules:
//! - Only `Admin` holders may grant or revoke roles.
//! - An admin cannot revoke its own `Admin` role, so the registry can never
//!   be left without an administrator by a single call.

use soroban_sdk::{contracttype, Address, Env};

use crate::events;
use crate::{Error, Role};

const DAY_IN_LEDGERS: u32 = 17_280;
const ROLE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const ROLE_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    Held(Address, Role),
}

/// Grant `Admin` to the first administrator. Called once from `init`.
pub fn bootstrap_admin(env: &Env, admin: &Address) {
    set_role(env, admin, Role::Admin, true);
    events::emit_role_set(env, admin.clone(), Role::Admin, admin.clone());
}

pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    let key = RbacKey::Held(account.clone(), role);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        env.storage()
            .persistent()
            .extend_ttl(&key, ROLE_LIFETIME_THRESHOLD, ROLE_BUMP_AMOUNT);
    }
    held
}

pub fn require_role(env: &Env, account: &Address, role: Role) -> Result<(), Error> {
    if has_role(env, account, role) {
        Ok(())
    } else {
        Err(Error::NotAuthorized)
    }
}

pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    caller.require_auth();
    require_role(env, caller, Role::Admin)?;

    set_role(env, target, role, true);
    events::emit_role_set(env, target.clone(), role, caller.clone());
    Ok(())
}

pub fn revoke_role(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    caller.require_auth();
    require_role(env, caller, Role::Admin)?;
    if role == Role::Admin && caller == target {
        return Err(Error::CannotRevokeOwnAdmin);
    }

    set_role(env, target, role, false);
    events::emit_role_del(env, target.clone(), role, caller.clone());
    Ok(())
}

fn set_role(env: &Env, account: &Address, role: Role, held: bool) {
    let key = RbacKey::Held(account.clone(), role);
    if held {
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, ROLE_LIFETIME_THRESHOLD, ROLE_BUMP_AMOUNT);
    } else {
        env.storage().persistent().remove(&key);
    }
}
