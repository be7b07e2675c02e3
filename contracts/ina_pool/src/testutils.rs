//! Shared fixture for the pool's test modules: a real attestation oracle,
//! a real registry, a Stellar asset and one initialised pool.

extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, BytesN, Env,
};

use attestation_oracle::{AttestationOracle, AttestationOracleClient};
use ina_registry::{InaRegistry, InaRegistryClient, Role};

use crate::{InaPool, InaPoolClient, PoolTerms};

pub const START: u64 = 1_000;
pub const END: u64 = 2_000;
pub const TERM: u64 = 500;
pub const POOL_KYC_LEVEL: u32 = 2;

pub struct Setup {
    pub env: Env,
    pub pool: InaPoolClient<'static>,
    pub registry: InaRegistryClient<'static>,
    pub oracle: AttestationOracleClient<'static>,
    pub token: token::Client<'static>,
    pub sac: token::StellarAssetClient<'static>,
    pub admin: Address,
    pub attester: Address,
    pub operator: Address,
    pub fee_receiver: Address,
    pub kyc_wallet: Address,
    pub facilitator: Address,
}

pub fn default_terms(facilitator: &Address) -> PoolTerms {
    PoolTerms {
        start_time: START,
        end_time: END,
        threshold: 50,
        amount_to_raise: 100,
        fee_basis_points: 250,
        estimated_return_basis_points: 1_000,
        credit_facilitator: facilitator.clone(),
        kyc_level: POOL_KYC_LEVEL,
        term: TERM,
    }
}

/// Registry, oracle and asset wired together; the pool is registered but
/// not yet initialised.
pub fn setup_uninitialized() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(&env);
    let attester = Address::generate(&env);
    let operator = Address::generate(&env);
    let fee_receiver = Address::generate(&env);
    let kyc_wallet = Address::generate(&env);
    let facilitator = Address::generate(&env);

    let oracle_id = env.register(AttestationOracle, ());
    let oracle = AttestationOracleClient::new(&env, &oracle_id);

    let registry_id = env.register(InaRegistry, ());
    let registry = InaRegistryClient::new(&env, &registry_id);
    registry.init(&admin, &oracle_id, &fee_receiver, &kyc_wallet);
    registry.grant_role(&admin, &attester, &Role::Attester);
    registry.grant_role(&admin, &operator, &Role::Operator);

    let token_admin = Address::generate(&env);
    let asset = env.register_stellar_asset_contract_v2(token_admin);
    let token = token::Client::new(&env, &asset.address());
    let sac = token::StellarAssetClient::new(&env, &asset.address());

    let pool_id = env.register(InaPool, ());
    let pool = InaPoolClient::new(&env, &pool_id);

    Setup {
        env,
        pool,
        registry,
        oracle,
        token,
        sac,
        admin,
        attester,
        operator,
        fee_receiver,
        kyc_wallet,
        facilitator,
    }
}

pub fn setup_with_terms(adjust: impl FnOnce(&mut PoolTerms)) -> Setup {
    let s = setup_uninitialized();
    let mut terms = default_terms(&s.facilitator);
    adjust(&mut terms);
    s.pool
        .initialize(&s.operator, &s.registry.address, &s.token.address, &terms);
    s
}

pub fn setup() -> Setup {
    setup_with_terms(|_| {})
}

impl Setup {
    pub fn kyc(&self, wallet: &Address, level: u32) -> BytesN<32> {
        self.registry.issue_kyc(&self.attester, wallet, &1, &level)
    }

    /// A fresh wallet holding 1 000 units of the asset and a valid KYC claim.
    pub fn investor(&self) -> (Address, BytesN<32>) {
        let investor = Address::generate(&self.env);
        self.sac.mint(&investor, &1_000);
        let uid = self.kyc(&investor, POOL_KYC_LEVEL);
        (investor, uid)
    }

    pub fn warp(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    pub fn close_raise(&self) {
        self.warp(END + 1);
    }

    pub fn reach_maturity(&self) {
        self.warp(END + TERM + 1);
    }

    /// Fund the facilitator with the full repayment and approve the pool to
    /// pull it. Returns the approved amount.
    pub fn approve_repayment(&self) -> i128 {
        let amount = self.pool.calculate_repayment_amount();
        self.sac.mint(&self.facilitator, &amount);
        let expiration = self.env.ledger().sequence() + 1_000;
        self.token
            .approve(&self.facilitator, &self.pool.address, &amount, &expiration);
        amount
    }
}
