//! Admission control.
//!
//! Every deposit resolves its attestation afresh through the registry's
//! oracle; nothing is cached, so a claim revoked after one deposit blocks
//! the next one while leaving earlier deposits untouched.
//!
//! A claim is accepted when, in order:
//! 1. it exists, is not revoked and has not expired;
//! 2. it was issued by the pool's registry and addressed to the registry's
//!    KYC wallet (`InvalidAttester` otherwise);
//! 3. its payload decodes as a [`KycClaim`];
//! 4. its level is at least the pool's `kyc_level`;
//! 5. its wallet is the depositing account.

use soroban_sdk::{xdr::FromXdr, Address, BytesN, Env};

use ina_common::{AttestationOracleClient, KycClaim, RegistryClient};

use crate::types::PoolConfig;
use crate::Error;

pub fn check_admission(
    env: &Env,
    config: &PoolConfig,
    investor: &Address,
    attestation_uid: &BytesN<32>,
) -> Result<KycClaim, Error> {
    let registry = RegistryClient::new(env, &config.registry);
    let oracle = AttestationOracleClient::new(env, &registry.attestation_oracle());

    let attestation = oracle
        .get_attestation(attestation_uid)
        .ok_or(Error::AttestationNotFound)?;
    if attestation.is_revoked() {
        return Err(Error::AttestationRevoked);
    }
    if attestation.is_expired(env.ledger().timestamp()) {
        return Err(Error::AttestationExpired);
    }

    if attestation.attester != config.registry || attestation.recipient != registry.kyc_wallet() {
        return Err(Error::InvalidAttester);
    }

    let claim =
        KycClaim::from_xdr(env, &attestation.data).map_err(|_| Error::MalformedAttestation)?;
    if claim.kyc_level < config.terms.kyc_level {
        return Err(Error::InvalidKycLevel);
    }
    if claim.wallet != *investor {
        return Err(Error::AttestationMismatch);
    }

    Ok(claim)
}
