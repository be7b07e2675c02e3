#![allow(dead_code)]

extern crate std;

use crate::{InaPoolClient, Pool};

/// INV-1: the share balances of all investors add up to `total_shares`.
pub fn assert_shares_sum_matches_total(client: &InaPoolClient) {
    let mut sum = 0i128;
    for investor in client.investors().iter() {
        sum += client.shares_of(&investor);
    }
    assert_eq!(
        sum,
        client.total_shares(),
        "INV-1 violated: share balances sum to {} but total_shares is {}",
        sum,
        client.total_shares()
    );
}

/// INV-2: accepted deposits never exceed the cap.
pub fn assert_cap_respected(pool: &Pool) {
    assert!(
        pool.total_invested <= pool.terms.amount_to_raise,
        "INV-2 violated: total_invested {} exceeds amount_to_raise {}",
        pool.total_invested,
        pool.terms.amount_to_raise
    );
}

/// INV-3: a pool is never both refunded and drawn down; repayment needs
/// a prior drawdown.
pub fn assert_latches_exclusive(pool: &Pool) {
    assert!(
        !(pool.refunded && pool.funds_taken),
        "INV-3 violated: pool is both refunded and funds_taken"
    );
    assert!(
        !pool.repaid || pool.funds_taken,
        "INV-3 violated: pool repaid without funds_taken"
    );
}

/// INV-4: after a refund nobody holds shares or a recorded investment.
pub fn assert_refund_complete(client: &InaPoolClient) {
    for investor in client.investors().iter() {
        assert_eq!(
            client.shares_of(&investor),
            0,
            "INV-4 violated: investor still holds shares after refund"
        );
        assert_eq!(
            client.investment_of(&investor),
            0,
            "INV-4 violated: investor still has a recorded investment after refund"
        );
    }
    assert_eq!(client.total_shares(), 0);
}

/// INV-5: payouts never exceed the repayment and lose less than one unit
/// per investor to rounding.
pub fn assert_repayment_conservation(repayment: i128, payouts: i128, investor_count: u32) {
    assert!(
        payouts <= repayment,
        "INV-5 violated: payouts {} exceed repayment {}",
        payouts,
        repayment
    );
    assert!(
        repayment - payouts < (investor_count as i128).max(1),
        "INV-5 violated: dust {} not below investor count {}",
        repayment - payouts,
        investor_count
    );
}

pub fn assert_all_pool_invariants(client: &InaPoolClient) {
    let pool = client.get_pool();
    assert_shares_sum_matches_total(client);
    assert_cap_respected(&pool);
    assert_latches_exclusive(&pool);
}
