extern crate std;

use soroban_sdk::{testutils::Address as _, xdr::ToXdr, Address, BytesN};

use ina_common::KycClaim;

use crate::testutils::{setup, POOL_KYC_LEVEL, START};
use crate::Error;

#[test]
fn test_level_at_or_above_pool_level_admitted() {
    let s = setup();
    for level in [POOL_KYC_LEVEL, POOL_KYC_LEVEL + 1] {
        let investor = Address::generate(&s.env);
        s.sac.mint(&investor, &100);
        let uid = s.kyc(&investor, level);
        s.pool.deposit(&investor, &10, &uid);
    }
    assert_eq!(s.pool.total_invested(), 20);
}

#[test]
fn test_level_below_pool_level_rejected() {
    let s = setup();
    let investor = Address::generate(&s.env);
    s.sac.mint(&investor, &100);
    let uid = s.kyc(&investor, POOL_KYC_LEVEL - 1);

    assert_eq!(
        s.pool.try_deposit(&investor, &10, &uid),
        Err(Ok(Error::InvalidKycLevel))
    );
}

#[test]
fn test_claim_for_another_wallet_rejected() {
    let s = setup();
    let (_owner, owner_uid) = s.investor();
    let (intruder, _) = s.investor();

    assert_eq!(
        s.pool.try_deposit(&intruder, &30, &owner_uid),
        Err(Ok(Error::AttestationMismatch))
    );
    assert_eq!(s.pool.total_invested(), 0);
    assert_eq!(s.token.balance(&intruder), 1_000);
}

#[test]
fn test_unknown_attestation_rejected() {
    let s = setup();
    let (investor, _) = s.investor();
    let uid = BytesN::from_array(&s.env, &[0x11u8; 32]);

    assert_eq!(
        s.pool.try_deposit(&investor, &10, &uid),
        Err(Ok(Error::AttestationNotFound))
    );
}

#[test]
fn test_revocation_blocks_later_deposits_only() {
    let s = setup();
    let (investor, uid) = s.investor();
    s.pool.deposit(&investor, &10, &uid);

    s.registry.revoke_kyc(&s.attester, &uid);

    assert_eq!(
        s.pool.try_deposit(&investor, &10, &uid),
        Err(Ok(Error::AttestationRevoked))
    );
    // The earlier deposit stands.
    assert_eq!(s.pool.investment_of(&investor), 10);
    assert_eq!(s.pool.shares_of(&investor), 10);

    // A fresh claim admits the investor again.
    let renewed = s.kyc(&investor, POOL_KYC_LEVEL);
    s.pool.deposit(&investor, &10, &renewed);
    assert_eq!(s.pool.investment_of(&investor), 20);
}

#[test]
fn test_claim_from_foreign_attester_rejected() {
    let s = setup();
    let investor = Address::generate(&s.env);
    s.sac.mint(&investor, &100);
    let rogue = Address::generate(&s.env);
    let claim = KycClaim {
        kyc_id: 9,
        kyc_level: 5,
        wallet: investor.clone(),
    };
    let uid = s
        .oracle
        .attest(&rogue, &s.kyc_wallet, &0, &claim.to_xdr(&s.env));

    assert_eq!(
        s.pool.try_deposit(&investor, &10, &uid),
        Err(Ok(Error::InvalidAttester))
    );
}

#[test]
fn test_claim_addressed_to_stale_kyc_wallet_rejected() {
    let s = setup();
    let (investor, uid) = s.investor();

    s.registry
        .set_kyc_wallet(&s.admin, &Address::generate(&s.env));

    assert_eq!(
        s.pool.try_deposit(&investor, &10, &uid),
        Err(Ok(Error::InvalidAttester))
    );
}

#[test]
fn test_expired_claim_rejected() {
    let s = setup();
    let investor = Address::generate(&s.env);
    s.sac.mint(&investor, &100);
    let claim = KycClaim {
        kyc_id: 1,
        kyc_level: POOL_KYC_LEVEL,
        wallet: investor.clone(),
    };
    let uid = s.oracle.attest(
        &Address::generate(&s.env),
        &s.kyc_wallet,
        &(START + 10),
        &claim.to_xdr(&s.env),
    );

    s.warp(START + 10);
    assert_eq!(
        s.pool.try_deposit(&investor, &10, &uid),
        Err(Ok(Error::AttestationExpired))
    );
}

#[test]
fn test_admission_checked_after_window_and_cap() {
    let s = setup();
    let investor = Address::generate(&s.env);
    s.sac.mint(&investor, &1_000);
    let bad_uid = BytesN::from_array(&s.env, &[0x22u8; 32]);

    assert_eq!(
        s.pool.try_deposit(&investor, &101, &bad_uid),
        Err(Ok(Error::InvestmentCapExceeded))
    );
    s.warp(START - 1);
    assert_eq!(
        s.pool.try_deposit(&investor, &10, &bad_uid),
        Err(Ok(Error::InvestmentPeriodClosed))
    );
}
