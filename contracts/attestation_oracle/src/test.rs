extern crate std;

use soroban_sdk::{
    bytes,
    testutils::{Address as _, Ledger},
    Address, Env,
};

use crate::{AttestationOracle, AttestationOracleClient, Error};

fn setup() -> (Env, AttestationOracleClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);
    let contract_id = env.register(AttestationOracle, ());
    let client = AttestationOracleClient::new(&env, &contract_id);
    (env, client)
}

#[test]
fn test_attest_and_resolve() {
    let (env, client) = setup();
    let attester = Address::generate(&env);
    let recipient = Address::generate(&env);
    let data = bytes!(&env, 0xdeadbeef);

    let uid = client.attest(&attester, &recipient, &0, &data);
    let att = client.get_attestation(&uid).expect("attestation missing");

    assert_eq!(att.uid, uid);
    assert_eq!(att.attester, attester);
    assert_eq!(att.recipient, recipient);
    assert_eq!(att.data, data);
    assert_eq!(att.time, 1_000);
    assert!(!att.is_revoked());
}

#[test]
fn test_identical_claims_get_distinct_uids() {
    let (env, client) = setup();
    let attester = Address::generate(&env);
    let recipient = Address::generate(&env);
    let data = bytes!(&env, 0x01);

    let first = client.attest(&attester, &recipient, &0, &data);
    let second = client.attest(&attester, &recipient, &0, &data);
    assert_ne!(first, second);
}

#[test]
fn test_unknown_uid_resolves_to_none() {
    let (env, client) = setup();
    let uid = soroban_sdk::BytesN::from_array(&env, &[7u8; 32]);
    assert_eq!(client.get_attestation(&uid), None);
}

#[test]
fn test_past_expiration_rejected() {
    let (env, client) = setup();
    let attester = Address::generate(&env);
    let recipient = Address::generate(&env);

    let res = client.try_attest(&attester, &recipient, &1_000, &bytes!(&env, 0x01));
    assert_eq!(res, Err(Ok(Error::InvalidExpiration)));
}

#[test]
fn test_revoke_stamps_record() {
    let (env, client) = setup();
    let attester = Address::generate(&env);
    let recipient = Address::generate(&env);
    let uid = client.attest(&attester, &recipient, &0, &bytes!(&env, 0x01));

    env.ledger().set_timestamp(1_500);
    client.revoke(&attester, &uid);

    let att = client.get_attestation(&uid).unwrap();
    assert!(att.is_revoked());
    assert_eq!(att.revocation_time, 1_500);
    // The claim itself is kept.
    assert_eq!(att.recipient, recipient);
}

#[test]
fn test_revoke_twice_fails() {
    let (env, client) = setup();
    let attester = Address::generate(&env);
    let uid = client.attest(&attester, &Address::generate(&env), &0, &bytes!(&env, 0x01));

    client.revoke(&attester, &uid);
    assert_eq!(
        client.try_revoke(&attester, &uid),
        Err(Ok(Error::AlreadyRevoked))
    );
}

#[test]
fn test_only_original_attester_revokes() {
    let (env, client) = setup();
    let attester = Address::generate(&env);
    let stranger = Address::generate(&env);
    let uid = client.attest(&attester, &Address::generate(&env), &0, &bytes!(&env, 0x01));

    assert_eq!(
        client.try_revoke(&stranger, &uid),
        Err(Ok(Error::NotAttester))
    );
    assert!(!client.get_attestation(&uid).unwrap().is_revoked());
}

#[test]
fn test_revoke_unknown_uid() {
    let (env, client) = setup();
    let uid = soroban_sdk::BytesN::from_array(&env, &[9u8; 32]);
    assert_eq!(
        client.try_revoke(&Address::generate(&env), &uid),
        Err(Ok(Error::AttestationNotFound))
    );
}
