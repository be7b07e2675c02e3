//! # Attestation Oracle
//!
//! An append-only store of signed claims. Any account may attest about any
//! recipient; only the original attester may later revoke its claim.
//! Revocation stamps the record, it never deletes it.
//!
//! | Entry point       | Who                 |
//! |-------------------|---------------------|
//! | `attest`          | the attester        |
//! | `revoke`          | the original attester |
//! | `get_attestation` | anyone (read-only)  |

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, xdr::ToXdr, Address, Bytes, BytesN, Env,
};

pub mod events;
mod storage;

#[cfg(test)]
mod test;

pub use ina_common::Attestation;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AttestationNotFound = 1,
    NotAttester = 2,
    AlreadyRevoked = 3,
    InvalidExpiration = 4,
}

#[contract]
pub struct AttestationOracle;

#[contractimpl]
impl AttestationOracle {
    /// Record a claim by `attester` about `recipient` and return its uid.
    ///
    /// `expiration_time` is a ledger timestamp, or `0` for a claim that
    /// never expires.
    pub fn attest(
        env: Env,
        attester: Address,
        recipient: Address,
        expiration_time: u64,
        data: Bytes,
    ) -> Result<BytesN<32>, Error> {
        attester.require_auth();

        let now = env.ledger().timestamp();
        if expiration_time != 0 && expiration_time <= now {
            return Err(Error::InvalidExpiration);
        }

        let nonce = storage::next_nonce(&env);
        let mut preimage = Bytes::new(&env);
        preimage.append(&attester.clone().to_xdr(&env));
        preimage.append(&recipient.clone().to_xdr(&env));
        preimage.append(&data);
        preimage.extend_from_array(&nonce.to_be_bytes());
        let uid: BytesN<32> = env.crypto().sha256(&preimage).to_bytes();

        let attestation = Attestation {
            uid: uid.clone(),
            attester,
            recipient,
            data,
            time: now,
            expiration_time,
            revocation_time: 0,
        };
        storage::save_attestation(&env, &attestation);
        events::emit_attested(&env, &attestation);

        Ok(uid)
    }

    /// Revoke a claim. Only the attester that issued it may do so.
    pub fn revoke(env: Env, attester: Address, uid: BytesN<32>) -> Result<(), Error> {
        attester.require_auth();

        let mut attestation =
            storage::load_attestation(&env, &uid).ok_or(Error::AttestationNotFound)?;
        if attestation.attester != attester {
            return Err(Error::NotAttester);
        }
        if attestation.is_revoked() {
            return Err(Error::AlreadyRevoked);
        }

        // A ledger at timestamp 0 would otherwise leave the claim looking live.
        attestation.revocation_time = env.ledger().timestamp().max(1);
        storage::save_attestation(&env, &attestation);
        events::emit_revoked(&env, uid, attester);
        Ok(())
    }

    /// Resolve a claim by uid.
    pub fn get_attestation(env: Env, uid: BytesN<32>) -> Option<Attestation> {
        storage::load_attestation(&env, &uid)
    }
}
