extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec,
    xdr::FromXdr,
    Address, Env, IntoVal, TryIntoVal,
};

use attestation_oracle::{AttestationOracle, AttestationOracleClient};
use ina_common::KycClaim;

use crate::events::{KycIssued, PoolRecorded};
use crate::{Error, InaRegistry, InaRegistryClient, Role};

struct Setup {
    env: Env,
    registry: InaRegistryClient<'static>,
    oracle: AttestationOracleClient<'static>,
    admin: Address,
    attester: Address,
    operator: Address,
    fee_receiver: Address,
    kyc_wallet: Address,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let oracle_id = env.register(AttestationOracle, ());
    let oracle = AttestationOracleClient::new(&env, &oracle_id);
    let registry_id = env.register(InaRegistry, ());
    let registry = InaRegistryClient::new(&env, &registry_id);

    let admin = Address::generate(&env);
    let attester = Address::generate(&env);
    let operator = Address::generate(&env);
    let fee_receiver = Address::generate(&env);
    let kyc_wallet = Address::generate(&env);

    registry.init(&admin, &oracle_id, &fee_receiver, &kyc_wallet);
    registry.grant_role(&admin, &attester, &Role::Attester);
    registry.grant_role(&admin, &operator, &Role::Operator);

    Setup {
        env,
        registry,
        oracle,
        admin,
        attester,
        operator,
        fee_receiver,
        kyc_wallet,
    }
}

#[test]
fn test_settings_queries() {
    let s = setup();
    assert_eq!(s.registry.fee_receiver(), s.fee_receiver);
    assert_eq!(s.registry.kyc_wallet(), s.kyc_wallet);
    assert_eq!(s.registry.attestation_oracle(), s.oracle.address);
}

#[test]
fn test_queries_before_init_fail() {
    let env = Env::default();
    let registry = InaRegistryClient::new(&env, &env.register(InaRegistry, ()));
    assert_eq!(registry.try_fee_receiver(), Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_admin_updates_settings() {
    let s = setup();
    let receiver = Address::generate(&s.env);
    let wallet = Address::generate(&s.env);

    s.registry.set_fee_receiver(&s.admin, &receiver);
    s.registry.set_kyc_wallet(&s.admin, &wallet);

    assert_eq!(s.registry.fee_receiver(), receiver);
    assert_eq!(s.registry.kyc_wallet(), wallet);
}

#[test]
fn test_non_admin_cannot_update_settings() {
    let s = setup();
    let res = s
        .registry
        .try_set_fee_receiver(&s.operator, &Address::generate(&s.env));
    assert_eq!(res, Err(Ok(Error::NotAuthorized)));
    assert_eq!(s.registry.fee_receiver(), s.fee_receiver);
}

#[test]
fn test_issue_kyc_attests_through_oracle() {
    let s = setup();
    let investor = Address::generate(&s.env);

    let uid = s.registry.issue_kyc(&s.attester, &investor, &7, &2);
    let att = s.oracle.get_attestation(&uid).expect("claim not stored");

    assert_eq!(att.attester, s.registry.address);
    assert_eq!(att.recipient, s.kyc_wallet);
    let claim = KycClaim::from_xdr(&s.env, &att.data).unwrap();
    assert_eq!(
        claim,
        KycClaim {
            kyc_id: 7,
            kyc_level: 2,
            wallet: investor,
        }
    );
}

#[test]
fn test_issue_kyc_emits_event() {
    let s = setup();
    let investor = Address::generate(&s.env);
    let uid = s.registry.issue_kyc(&s.attester, &investor, &1, &3);

    let events = s.env.events().all();
    let last = events.last().expect("no events");
    assert_eq!(last.0, s.registry.address);
    assert_eq!(
        last.1,
        vec![
            &s.env,
            symbol_short!("kyc_add").into_val(&s.env),
            investor.into_val(&s.env),
        ]
    );
    let data: KycIssued = last.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        data,
        KycIssued {
            wallet: investor,
            uid,
            kyc_level: 3,
        }
    );
}

#[test]
fn test_only_attesters_issue_kyc() {
    let s = setup();
    let res = s
        .registry
        .try_issue_kyc(&s.operator, &Address::generate(&s.env), &1, &1);
    assert_eq!(res, Err(Ok(Error::NotAuthorized)));
}

#[test]
fn test_revoke_kyc() {
    let s = setup();
    let uid = s
        .registry
        .issue_kyc(&s.attester, &Address::generate(&s.env), &1, &1);

    s.registry.revoke_kyc(&s.attester, &uid);
    assert!(s.oracle.get_attestation(&uid).unwrap().is_revoked());
}

#[test]
fn test_revoke_kyc_requires_attester() {
    let s = setup();
    let uid = s
        .registry
        .issue_kyc(&s.attester, &Address::generate(&s.env), &1, &1);

    let res = s.registry.try_revoke_kyc(&s.admin, &uid);
    assert_eq!(res, Err(Ok(Error::NotAuthorized)));
    assert!(!s.oracle.get_attestation(&uid).unwrap().is_revoked());
}

#[test]
fn test_record_pool() {
    let s = setup();
    let pool = Address::generate(&s.env);

    s.registry.record_pool(&s.operator, &pool);

    assert!(s.registry.is_recorded_pool(&pool));
    assert_eq!(s.registry.pools(), vec![&s.env, pool.clone()]);

    let last = s.env.events().all().last().expect("no events");
    let data: PoolRecorded = last.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        data,
        PoolRecorded {
            pool,
            operator: s.operator.clone(),
        }
    );
}

#[test]
fn test_record_pool_twice_fails() {
    let s = setup();
    let pool = Address::generate(&s.env);
    s.registry.record_pool(&s.operator, &pool);

    assert_eq!(
        s.registry.try_record_pool(&s.operator, &pool),
        Err(Ok(Error::PoolAlreadyRecorded))
    );
    assert_eq!(s.registry.pools().len(), 1);
}

#[test]
fn test_record_pool_requires_operator() {
    let s = setup();
    let res = s
        .registry
        .try_record_pool(&s.attester, &Address::generate(&s.env));
    assert_eq!(res, Err(Ok(Error::NotAuthorized)));
}
