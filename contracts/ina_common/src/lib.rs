//! # Ina Common
//!
//! Types shared by the attestation oracle, the access registry and the
//! investment pools, together with the client interfaces each contract uses
//! to call the others.
//!
//! Contracts never depend on one another's crates directly: a contract crate
//! exports its entry points when built for wasm, so linking two of them into
//! one artifact would clash. Cross-contract calls go through the
//! [`contractclient`] traits declared here instead.

#![no_std]

use soroban_sdk::{contractclient, contracttype, Address, Bytes, BytesN, Env};

/// Denominator for every basis-point quantity (fees, return rates).
pub const BASIS_POINTS_DENOMINATOR: i128 = 10_000;

/// Capability held by an account in the registry.
///
/// An account may hold any subset of roles.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Manages roles and registry settings.
    Admin,
    /// Issues and revokes KYC attestations.
    Attester,
    /// Deploys and records investment pools.
    Operator,
}

/// A signed claim resolvable by its `uid`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attestation {
    pub uid: BytesN<32>,
    /// Account that issued (and may revoke) the claim.
    pub attester: Address,
    /// Account the claim is about.
    pub recipient: Address,
    /// Opaque payload; for KYC claims the XDR encoding of [`KycClaim`].
    pub data: Bytes,
    /// Ledger timestamp at issuance.
    pub time: u64,
    /// `0` means the claim never expires.
    pub expiration_time: u64,
    /// `0` means the claim has not been revoked.
    pub revocation_time: u64,
}

impl Attestation {
    pub fn is_revoked(&self) -> bool {
        self.revocation_time != 0
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expiration_time != 0 && now >= self.expiration_time
    }
}

/// Payload of a KYC attestation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KycClaim {
    pub kyc_id: u64,
    pub kyc_level: u32,
    /// Smart wallet the verified person invests from.
    pub wallet: Address,
}

#[contractclient(name = "AttestationOracleClient")]
pub trait AttestationOracleInterface {
    fn attest(
        env: Env,
        attester: Address,
        recipient: Address,
        expiration_time: u64,
        data: Bytes,
    ) -> BytesN<32>;

    fn revoke(env: Env, attester: Address, uid: BytesN<32>);

    fn get_attestation(env: Env, uid: BytesN<32>) -> Option<Attestation>;
}

#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn fee_receiver(env: Env) -> Address;

    /// Wallet every valid KYC attestation must be addressed to.
    fn kyc_wallet(env: Env) -> Address;

    fn attestation_oracle(env: Env) -> Address;

    fn has_role(env: Env, account: Address, role: Role) -> bool;
}
