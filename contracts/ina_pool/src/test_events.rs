extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::Events,
    vec, IntoVal, TryIntoVal,
};

use crate::events::{Deposited, FundsTaken, PaidOut, Refunded, Repaid};
use crate::testutils::setup;

#[test]
fn test_deposit_event() {
    let s = setup();
    let (investor, uid) = s.investor();
    s.pool.deposit(&investor, &30, &uid);

    let events = s.env.events().all();
    let last = events.last().expect("No events found");

    assert_eq!(last.0, s.pool.address);
    assert_eq!(
        last.1,
        vec![
            &s.env,
            symbol_short!("deposit").into_val(&s.env),
            investor.into_val(&s.env),
        ]
    );
    let data: Deposited = last.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        data,
        Deposited {
            investor,
            amount: 30,
            shares: 30,
            kyc_id: 1,
        }
    );
}

#[test]
fn test_refund_event_per_investor() {
    let s = setup();
    let (a, uid_a) = s.investor();
    let (b, uid_b) = s.investor();
    s.pool.deposit(&a, &10, &uid_a);
    s.pool.deposit(&b, &20, &uid_b);
    s.close_raise();
    s.pool.refund();

    let refunds: std::vec::Vec<Refunded> = s
        .env
        .events()
        .all()
        .iter()
        .filter(|e| e.0 == s.pool.address)
        .filter_map(|e| e.2.try_into_val(&s.env).ok())
        .collect();

    assert_eq!(
        refunds,
        std::vec![
            Refunded {
                investor: a,
                amount: 10,
                shares: 10,
            },
            Refunded {
                investor: b,
                amount: 20,
                shares: 20,
            },
        ]
    );
}

#[test]
fn test_funds_taken_event() {
    let s = setup();
    let (investor, uid) = s.investor();
    s.pool.deposit(&investor, &60, &uid);
    s.close_raise();
    s.pool.take_funds(&s.facilitator);

    let last = s.env.events().all().last().expect("No events found");
    assert_eq!(last.0, s.pool.address);
    assert_eq!(
        last.1,
        vec![
            &s.env,
            symbol_short!("taken").into_val(&s.env),
            s.facilitator.into_val(&s.env),
        ]
    );
    let data: FundsTaken = last.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        data,
        FundsTaken {
            facilitator: s.facilitator.clone(),
            fee_receiver: s.fee_receiver.clone(),
            fee: 1,
            principal: 59,
        }
    );
}

#[test]
fn test_repaid_and_payout_events() {
    let s = setup();
    let (investor, uid) = s.investor();
    s.pool.deposit(&investor, &60, &uid);
    s.close_raise();
    s.pool.take_funds(&s.facilitator);
    s.reach_maturity();
    s.approve_repayment();
    s.pool.repay(&s.facilitator);

    let pool_events: std::vec::Vec<_> = s
        .env
        .events()
        .all()
        .iter()
        .filter(|e| e.0 == s.pool.address)
        .collect();
    let n = pool_events.len();
    assert!(n >= 2);

    let repaid: Repaid = pool_events[n - 2].2.try_into_val(&s.env).unwrap();
    assert_eq!(
        repaid,
        Repaid {
            facilitator: s.facilitator.clone(),
            amount: 66,
        }
    );
    let paid: PaidOut = pool_events[n - 1].2.try_into_val(&s.env).unwrap();
    assert_eq!(
        paid,
        PaidOut {
            investor,
            shares: 60,
            amount: 66,
        }
    );
}
