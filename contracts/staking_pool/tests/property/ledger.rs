#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for the stake ledger.
//!
//! Invariants tested:
//! - `pool.total_staked` always equals the sum of all participant stakes,
//!   which always equals the token balance the contract holds
//! - A rejected deposit never changes any ledger state

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking_pool::{ContractError, StakingPoolContract, StakingPoolContractClient};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (
    Env,
    StakingPoolContractClient<'static>,
    Address, // admin
    Address, // token
    Address, // contract id
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let token_id = token.address();

    let contract_id = env.register(StakingPoolContract, ());
    let client = StakingPoolContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &token_id, &6);

    (env, client, admin, token_id, contract_id)
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    /// For any sequence of deposits spread over three participants, the
    /// per-participant records, the pool total, and the contract's token
    /// balance must all agree.
    #[test]
    fn prop_total_staked_conserved(
        deposits in prop::collection::vec(1i128..=1_000i128, 1..8),
    ) {
        let (env, client, admin, token, contract_id) = setup();
        let pool_id = client.create_pool(&admin, &1, &1_000_000, &86_400);

        let participants: std::vec::Vec<Address> =
            (0..3).map(|_| Address::generate(&env)).collect();
        for p in &participants {
            StellarAssetClient::new(&env, &token).mint(p, &1_000_000);
        }

        let mut expected: std::vec::Vec<i128> = std::vec![0; participants.len()];
        let mut expected_total = 0i128;

        for (i, amount) in deposits.iter().enumerate() {
            let who = i % participants.len();
            client.stake(&participants[who], &pool_id, amount);
            expected[who] += amount;
            expected_total += amount;
        }

        let mut recorded_sum = 0i128;
        for (who, p) in participants.iter().enumerate() {
            let recorded = client
                .get_stake(&pool_id, p)
                .map(|s| s.amount)
                .unwrap_or(0);
            prop_assert_eq!(recorded, expected[who]);
            recorded_sum += recorded;
        }

        prop_assert_eq!(recorded_sum, expected_total);
        prop_assert_eq!(client.get_pool(&pool_id).total_staked, expected_total);
        prop_assert_eq!(
            TokenClient::new(&env, &token).balance(&contract_id),
            expected_total
        );
    }

    /// A deposit below the pool minimum must be rejected without touching
    /// the ledger or moving tokens.
    #[test]
    fn prop_rejected_deposit_leaves_ledger_unchanged(
        min_stake in 2i128..=1_000i128,
        shortfall in 1i128..=1_000i128,
    ) {
        let (env, client, admin, token, contract_id) = setup();
        let pool_id = client.create_pool(&admin, &min_stake, &1_000_000, &86_400);

        let participant = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&participant, &1_000_000);

        // Anything short of the minimum, down to negative amounts, is rejected.
        let amount = min_stake - shortfall;
        let result = client.try_stake(&participant, &pool_id, &amount);
        match result {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::AmountTooLow),
            _ => prop_assert!(false, "Expected AmountTooLow error"),
        }

        prop_assert_eq!(client.get_pool(&pool_id).total_staked, 0);
        prop_assert_eq!(client.get_stake(&pool_id, &participant), None);
        prop_assert_eq!(TokenClient::new(&env, &token).balance(&contract_id), 0);
    }
}
