//! Events published by the attestation oracle.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use ina_common::Attestation;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attested {
    pub uid: BytesN<32>,
    pub attester: Address,
    pub recipient: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Revoked {
    pub uid: BytesN<32>,
    pub attester: Address,
}

pub fn emit_attested(env: &Env, attestation: &Attestation) {
    env.events().publish(
        (symbol_short!("attested"), attestation.recipient.clone()),
        Attested {
            uid: attestation.uid.clone(),
            attester: attestation.attester.clone(),
            recipient: attestation.recipient.clone(),
        },
    );
}

pub fn emit_revoked(env: &Env, uid: BytesN<32>, attester: Address) {
    env.events().publish(
        (symbol_short!("revoked"), attester.clone()),
        Revoked { uid, attester },
    );
}
