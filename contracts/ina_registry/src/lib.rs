//! # Ina Registry Contract
//!
//! The permissioned directory every investment pool consults. It owns:
//!
//! | Concern       | Entry Point(s)                                           |
//! |---------------|----------------------------------------------------------|
//! | Bootstrap     | [`InaRegistry::init`]                                    |
//! | Roles         | `grant_role`, `revoke_role`, `has_role`                  |
//! | Settings      | `set_fee_receiver`, `set_kyc_wallet`                     |
//! | KYC           | `issue_kyc`, `revoke_kyc`                                |
//! | Pool registry | `record_pool`, `pools`                                   |
//! | Queries       | `fee_receiver`, `kyc_wallet`, `attestation_oracle`       |
//!
//! ## KYC indirection
//!
//! The registry is the attester of every KYC claim. Each claim is addressed
//! to the platform's KYC wallet and carries the investor's smart wallet in
//! its payload, so a pool accepts a claim only when it was issued by its
//! registry *to* the platform wallet *about* the depositing wallet.
//!
//! Authorization is delegated to [`rbac`], storage to [`storage`].

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, xdr::ToXdr, Address, BytesN, Env, Vec,
};

pub mod events;
pub mod rbac;
mod storage;

#[cfg(test)]
mod test;

use ina_common::{AttestationOracleClient, KycClaim};
pub use ina_common::Role;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    CannotRevokeOwnAdmin = 4,
    PoolAlreadyRecorded = 5,
}

#[contract]
pub struct InaRegistry;

#[contractimpl]
impl InaRegistry {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the registry and grant `admin` the `Admin` role.
    ///
    /// Must be called exactly once after deployment.
    pub fn init(
        env: Env,
        admin: Address,
        attestation_oracle: Address,
        fee_receiver: Address,
        kyc_wallet: Address,
    ) -> Result<(), Error> {
        admin.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        storage::set_settings(
            &env,
            &storage::Settings {
                attestation_oracle,
                fee_receiver,
                kyc_wallet,
            },
        );
        rbac::bootstrap_admin(&env, &admin);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `target`. `caller` must be an admin.
    pub fn grant_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        rbac::grant_role(&env, &caller, &target, role)
    }

    /// Revoke `role` from `target`. `caller` must be an admin and may not
    /// drop its own `Admin` role.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        target: Address,
        role: Role,
    ) -> Result<(), Error> {
        rbac::revoke_role(&env, &caller, &target, role)
    }

    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        rbac::has_role(&env, &account, role)
    }

    // ─────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────

    pub fn set_fee_receiver(env: Env, caller: Address, receiver: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(&env, &caller, Role::Admin)?;
        let mut settings = storage::get_settings(&env)?;
        settings.fee_receiver = receiver.clone();
        storage::set_settings(&env, &settings);
        events::emit_fee_receiver_set(&env, receiver, caller);
        Ok(())
    }

    pub fn set_kyc_wallet(env: Env, caller: Address, wallet: Address) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(&env, &caller, Role::Admin)?;
        let mut settings = storage::get_settings(&env)?;
        settings.kyc_wallet = wallet.clone();
        storage::set_settings(&env, &settings);
        events::emit_kyc_wallet_set(&env, wallet, caller);
        Ok(())
    }

    pub fn fee_receiver(env: Env) -> Result<Address, Error> {
        Ok(storage::get_settings(&env)?.fee_receiver)
    }

    pub fn kyc_wallet(env: Env) -> Result<Address, Error> {
        Ok(storage::get_settings(&env)?.kyc_wallet)
    }

    pub fn attestation_oracle(env: Env) -> Result<Address, Error> {
        Ok(storage::get_settings(&env)?.attestation_oracle)
    }

    // ─────────────────────────────────────────────────────────
    // KYC
    // ─────────────────────────────────────────────────────────

    /// Attest that `wallet` passed KYC at `kyc_level` and return the claim uid.
    ///
    /// The registry signs as attester and addresses the claim to the
    /// configured KYC wallet. `attester` must hold the `Attester` role.
    pub fn issue_kyc(
        env: Env,
        attester: Address,
        wallet: Address,
        kyc_id: u64,
        kyc_level: u32,
    ) -> Result<BytesN<32>, Error> {
        attester.require_auth();
        rbac::require_role(&env, &attester, Role::Attester)?;
        let settings = storage::get_settings(&env)?;

        let claim = KycClaim {
            kyc_id,
            kyc_level,
            wallet: wallet.clone(),
        };
        let oracle = AttestationOracleClient::new(&env, &settings.attestation_oracle);
        let uid = oracle.attest(
            &env.current_contract_address(),
            &settings.kyc_wallet,
            &0,
            &claim.to_xdr(&env),
        );

        events::emit_kyc_issued(&env, wallet, uid.clone(), kyc_level);
        Ok(uid)
    }

    /// Revoke a KYC claim previously issued by this registry.
    pub fn revoke_kyc(env: Env, attester: Address, uid: BytesN<32>) -> Result<(), Error> {
        attester.require_auth();
        rbac::require_role(&env, &attester, Role::Attester)?;
        let settings = storage::get_settings(&env)?;

        let oracle = AttestationOracleClient::new(&env, &settings.attestation_oracle);
        oracle.revoke(&env.current_contract_address(), &uid);

        events::emit_kyc_revoked(&env, uid, attester);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Pool directory
    // ─────────────────────────────────────────────────────────

    /// Record a deployed pool. `operator` must hold the `Operator` role.
    pub fn record_pool(env: Env, operator: Address, pool: Address) -> Result<(), Error> {
        operator.require_auth();
        rbac::require_role(&env, &operator, Role::Operator)?;
        storage::get_settings(&env)?;

        if storage::is_recorded_pool(&env, &pool) {
            return Err(Error::PoolAlreadyRecorded);
        }
        storage::push_pool(&env, &pool);
        events::emit_pool_recorded(&env, pool, operator);
        Ok(())
    }

    pub fn is_recorded_pool(env: Env, pool: Address) -> bool {
        storage::is_recorded_pool(&env, &pool)
    }

    pub fn pools(env: Env) -> Vec<Address> {
        storage::get_pools(&env)
    }
}
